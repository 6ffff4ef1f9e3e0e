use thiserror::Error;

pub type Result<T> = std::result::Result<T, CadenceError>;

#[derive(Error, Debug)]
pub enum CadenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git error: {0}")]
    Git(String),
    #[error("repository {0} not found")]
    RepoNotFound(String),
    #[error("no commit records in history of {0}")]
    EmptyHistory(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
