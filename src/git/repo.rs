use crate::error::{CadenceError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of per-commit diffstat text.
///
/// Seam between the log scanner and the version-control tool, so the
/// scanner can be exercised against canned text in tests.
pub trait DiffstatSource {
    fn commit_diffstat(&self, commit_id: &str) -> Result<String>;
}

#[derive(Debug)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or the current dir if `None`.
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        if !path.exists() {
            return Err(CadenceError::RepoNotFound(path.display().to_string()));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full `git log` output for the repository as one text blob.
    ///
    /// A failed invocation is fatal for the ingestion pass.
    pub fn full_log(&self) -> Result<String> {
        let output = Command::new("git")
            .arg("log")
            .current_dir(&self.path)
            .output()?;

        if !output.status.success() {
            return Err(CadenceError::Git(format!(
                "git log in {} failed: {}",
                self.path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DiffstatSource for GitRepo {
    /// Diffstat block for one commit, with the output lines reversed so the
    /// change-summary line comes first and the trailing blank line last,
    /// which is the shape the diffstat parser expects.
    fn commit_diffstat(&self, commit_id: &str) -> Result<String> {
        let output = Command::new("git")
            .args(["--no-pager", "show", commit_id, "--stat", "--format="])
            .current_dir(&self.path)
            .output()?;

        if !output.status.success() {
            return Err(CadenceError::Git(format!(
                "git show {} failed: {}",
                commit_id,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(reverse_lines(&text))
    }
}

fn reverse_lines(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.reverse();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_puts_summary_first_and_blank_last() {
        let raw = " a.txt | 2 ++\n b.txt | 3 ---\n 2 files changed, 2 insertions(+), 3 deletions(-)\n";
        let reversed = reverse_lines(raw);
        let lines: Vec<&str> = reversed.split('\n').collect();
        assert_eq!(lines[0], " 2 files changed, 2 insertions(+), 3 deletions(-)");
        // the trailing blank is what the diffstat parser always excludes
        assert_eq!(lines.last(), Some(&""));

        let stat = crate::parse::parse_diffstat(&reversed);
        assert_eq!(stat.files, vec!["b.txt", "a.txt"]);
        assert_eq!(stat.added, 2);
        assert_eq!(stat.removed, 3);
    }

    #[test]
    fn open_missing_path_is_an_error() {
        let err = GitRepo::open(Some("/definitely/not/a/repo")).unwrap_err();
        assert!(matches!(err, CadenceError::RepoNotFound(_)));
    }
}
