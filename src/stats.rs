use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{DailyBucket, StatsOutput, SCHEMA_VERSION};
use crate::store::{ingest, StatStore};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, author: String, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let mut store = StatStore::new();
    ingest(&mut store, &repo).context("Failed to ingest repository history")?;

    let repository = repo.path().display().to_string();
    let stats = store
        .get_user_stats(&author, &repository)
        .context("Failed to query author statistics")?;

    if json {
        output_json(&stats, &repository, &author)?;
    } else if ndjson {
        output_ndjson(&stats)?;
    } else {
        output_table(&stats, &author);
    }

    Ok(())
}

fn output_json(stats: &[DailyBucket], repository: &str, author: &str) -> anyhow::Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository.to_string(),
        author: author.to_string(),
        entries: stats.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(stats: &[DailyBucket]) -> anyhow::Result<()> {
    for bucket in stats {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

fn output_table(stats: &[DailyBucket], author: &str) {
    println!("Daily activity for {author}");
    println!(
        "{:<12} {:>8} {:>8} {:>6}",
        style("Day").bold(),
        style("Added").bold(),
        style("Removed").bold(),
        style("Files").bold()
    );
    println!("{}", "─".repeat(38));
    for bucket in stats {
        println!(
            "{:<12} {:>8} {:>8} {:>6}",
            bucket.day,
            bucket.total_added_lines,
            bucket.total_removed_lines,
            bucket.total_file_changes
        );
    }
    if stats.is_empty() {
        println!("no activity recorded");
    }
}
