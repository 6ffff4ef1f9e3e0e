use crate::error::{CadenceError, Result};
use crate::git::{DiffstatSource, GitRepo};
use crate::model::{AuthorEntry, BucketKey, CommitRecord, DailyBucket, RepoCursor};
use crate::scan::scan_log;
use crate::util::day_key;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::collections::{HashMap, HashSet};

/// In-memory index of daily buckets, per-repository cursors and the
/// author side-index. Owned explicitly by the caller; one ingestion pass
/// or query runs against it at a time.
#[derive(Debug, Default)]
pub struct StatStore {
    buckets: HashMap<BucketKey, DailyBucket>,
    cursors: HashMap<String, RepoCursor>,
    records_by_author: HashMap<String, Vec<CommitRecord>>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed record into its (day, author, repository) bucket.
    ///
    /// Counts accumulate; file paths union into the bucket's set, and
    /// `total_file_changes` is recomputed from the set after every fold.
    pub fn fold(&mut self, record: &CommitRecord, repository: &str) {
        let Some(ts) = record.timestamp else {
            return;
        };
        let day = day_key(&ts);
        let key = BucketKey::new(day, &record.author_email, repository);

        self.records_by_author
            .entry(record.author_email.clone())
            .or_default()
            .push(record.clone());

        match self.buckets.get_mut(&key) {
            Some(bucket) => {
                bucket.total_added_lines += record.added_lines;
                bucket.total_removed_lines += record.removed_lines;
                bucket
                    .changed_files
                    .extend(record.file_changes.iter().cloned());
                bucket.total_file_changes = bucket.changed_files.len();
            }
            None => {
                let changed_files: HashSet<String> =
                    record.file_changes.iter().cloned().collect();
                self.buckets.insert(
                    key,
                    DailyBucket {
                        day,
                        repository: repository.to_string(),
                        total_file_changes: changed_files.len(),
                        changed_files,
                        total_added_lines: record.added_lines,
                        total_removed_lines: record.removed_lines,
                    },
                );
            }
        }
    }

    /// Record the repository's earliest commit timestamp. Write-once: a
    /// repository already present keeps its original cursor.
    pub fn record_cursor(&mut self, repository: &str, earliest: DateTime<FixedOffset>) {
        self.cursors
            .entry(repository.to_string())
            .or_insert(RepoCursor {
                earliest_timestamp: earliest,
            });
    }

    pub fn cursor(&self, repository: &str) -> Option<&RepoCursor> {
        self.cursors.get(repository)
    }

    /// Distinct authors seen across all ingested history, with the number
    /// of commit records attributed to each, sorted by email.
    pub fn authors(&self) -> Vec<AuthorEntry> {
        let mut entries: Vec<AuthorEntry> = self
            .records_by_author
            .iter()
            .map(|(email, records)| AuthorEntry {
                email: email.clone(),
                commit_count: records.len(),
            })
            .collect();
        entries.sort_by(|a, b| a.email.cmp(&b.email));
        entries
    }

    /// All daily buckets for one author in one repository, walking one
    /// calendar day at a time from the repository's earliest commit up to
    /// now. Days without data are skipped, not emitted as zeros; each
    /// emitted bucket carries the walk's day.
    pub fn get_user_stats(&self, author: &str, repository: &str) -> Result<Vec<DailyBucket>> {
        let cursor = self
            .cursors
            .get(repository)
            .ok_or_else(|| CadenceError::RepoNotFound(repository.to_string()))?;

        let now = Utc::now().fixed_offset();
        let mut results = Vec::new();
        let mut ts = cursor.earliest_timestamp;
        while ts < now {
            let key = BucketKey::new(day_key(&ts), author, repository);
            if let Some(bucket) = self.buckets.get(&key) {
                let mut copy = bucket.clone();
                copy.day = day_key(&ts);
                results.push(copy);
            }
            ts = ts + Duration::days(1);
        }
        Ok(results)
    }

    /// Cross-author report for one repository. Interface reserved; yields
    /// no data yet and callers must not rely on it.
    pub fn get_all_stats(&self, _repository: &str) -> Vec<DailyBucket> {
        Vec::new()
    }
}

/// Run one ingestion pass for `repo`: full log retrieval (fatal on
/// failure), scan, fold, cursor.
pub fn ingest(store: &mut StatStore, repo: &GitRepo) -> Result<()> {
    let log_text = repo.full_log()?;
    let repository = repo.path().display().to_string();
    ingest_text(store, &repository, &log_text, repo)
}

/// Ingest already-retrieved log text, pulling diffstats through `source`.
///
/// A log that yields zero completed records is an error and leaves the
/// store untouched. The log is reverse-chronological, so the last record
/// in scan order supplies the repository's earliest timestamp.
pub fn ingest_text<S: DiffstatSource>(
    store: &mut StatStore,
    repository: &str,
    log_text: &str,
    source: &S,
) -> Result<()> {
    let records = scan_log(log_text, source);
    let earliest = match records.last().and_then(|r| r.timestamp) {
        Some(ts) => ts,
        None => return Err(CadenceError::EmptyHistory(repository.to_string())),
    };

    for record in &records {
        store.fold(record, repository);
    }
    store.record_cursor(repository, earliest);
    Ok(())
}
