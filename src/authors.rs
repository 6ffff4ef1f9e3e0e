use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{AuthorEntry, AuthorsOutput, SCHEMA_VERSION};
use crate::store::{ingest, StatStore};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let mut store = StatStore::new();
    ingest(&mut store, &repo).context("Failed to ingest repository history")?;

    let entries = store.authors();

    if json {
        let output = AuthorsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository_path: repo.path().display().to_string(),
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_table(&entries);
    }

    Ok(())
}

fn output_table(entries: &[AuthorEntry]) {
    println!(
        "{:<40} {:>8}",
        style("Author").bold(),
        style("Commits").bold()
    );
    println!("{}", "─".repeat(49));
    for entry in entries {
        println!("{:<40} {:>8}", entry.email, entry.commit_count);
    }
}
