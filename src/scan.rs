use crate::git::DiffstatSource;
use crate::model::CommitRecord;
use crate::parse::{parse_author, parse_commit, parse_date, parse_diffstat, Diffstat};
use indicatif::{ProgressBar, ProgressStyle};

/// Scan one repository's full log text and reassemble commit records.
///
/// Fields of a record arrive on scattered lines; each line is tried
/// against the author, commit and date parsers in that order, and the
/// first match wins. Anything none of them recognize is commit message
/// body and is ignored. A record is complete once all three fields are
/// set, checked before every line so the completed record is flushed
/// before the next commit's lines start filling a fresh one.
///
/// Recognizing a commit line also pulls that commit's diffstat through
/// `source`; a failed retrieval leaves the record with no file changes
/// and zero counts rather than aborting the scan.
///
/// Returns completed records in scan order (reverse-chronological for
/// `git log` output). A trailing record that never completed is dropped.
pub fn scan_log<S: DiffstatSource>(text: &str, source: &S) -> Vec<CommitRecord> {
    let mut records = Vec::new();
    let mut record = CommitRecord::default();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Scanning history...");

    for line in text.lines() {
        if record.is_complete() {
            records.push(std::mem::take(&mut record));
            pb.inc(1);
        }

        if let Some(email) = parse_author(line) {
            record.author_email = email.to_string();
            continue;
        }
        if let Some(id) = parse_commit(line) {
            log::debug!("scanning commit {id}");
            record.commit_id = id.to_string();
            let stat = match source.commit_diffstat(id) {
                Ok(block) => parse_diffstat(&block),
                Err(e) => {
                    log::warn!("diffstat for {id} unavailable: {e}");
                    Diffstat::default()
                }
            };
            record.file_changes = stat.files;
            record.added_lines = stat.added;
            record.removed_lines = stat.removed;
            continue;
        }
        if let Some(ts) = parse_date(line) {
            record.timestamp = Some(ts);
        }
    }

    if record.is_complete() {
        records.push(record);
        pb.inc(1);
    }

    pb.finish_and_clear();
    records
}
