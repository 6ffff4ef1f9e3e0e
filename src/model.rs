use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SCHEMA_VERSION: u32 = 1;

/// One parsed commit, assembled incrementally while scanning log text.
///
/// A record is only meaningful once [`CommitRecord::is_complete`] holds;
/// incomplete records are dropped at end of scan, never folded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_email: String,
    pub commit_id: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub file_changes: Vec<String>,
    pub added_lines: u64,
    pub removed_lines: u64,
}

impl CommitRecord {
    pub fn is_complete(&self) -> bool {
        !self.author_email.is_empty() && !self.commit_id.is_empty() && self.timestamp.is_some()
    }
}

/// Running totals for one (day, author, repository) bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBucket {
    pub day: NaiveDate,
    pub repository: String,
    pub changed_files: HashSet<String>,
    pub total_file_changes: usize,
    pub total_added_lines: u64,
    pub total_removed_lines: u64,
}

/// Composite bucket key. A struct key is collision-free for any
/// (day, email, repository) triple, unlike a joined string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub day: NaiveDate,
    pub author_email: String,
    pub repository: String,
}

impl BucketKey {
    pub fn new(day: NaiveDate, author_email: &str, repository: &str) -> Self {
        Self {
            day,
            author_email: author_email.to_string(),
            repository: repository.to_string(),
        }
    }
}

/// Per-repository ingestion cursor: the timestamp of the chronologically
/// earliest commit, recorded once on first successful ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCursor {
    pub earliest_timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub author: String,
    pub entries: Vec<DailyBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub email: String,
    pub commit_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub entries: Vec<AuthorEntry>,
}
