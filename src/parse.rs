use chrono::{DateTime, FixedOffset};

/// Timestamp layout of a `git log` date line, e.g.
/// `Thu Feb 22 12:07:44 2024 +0700`.
pub const LOG_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

/// Extract the author email from an `Author: Name <email>` line.
///
/// Recognition is anchored on the literal `Author` prefix; a line merely
/// containing `Author` elsewhere yields `None`. The email is the text
/// between the first `<` and the first `>` after it.
pub fn parse_author(line: &str) -> Option<&str> {
    if !line.starts_with("Author") {
        return None;
    }
    let start = line.find('<')?;
    let rest = &line[start + 1..];
    let end = rest.find('>')?;
    let email = &rest[..end];
    if email.is_empty() {
        return None;
    }
    Some(email)
}

/// Extract the commit id from a `commit <sha>` line.
pub fn parse_commit(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("commit")?.trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest)
}

/// Extract the timestamp from a `Date:   <timestamp>` line.
///
/// Returns `None` both when the prefix is absent and when the remainder
/// does not parse against [`LOG_TIME_FORMAT`]; the caller cannot tell the
/// two apart. Malformed dates are absorbed, not escalated.
pub fn parse_date(line: &str) -> Option<DateTime<FixedOffset>> {
    let rest = line.strip_prefix("Date:")?.trim();
    match DateTime::parse_from_str(rest, LOG_TIME_FORMAT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::debug!("unparseable date line {rest:?}: {e}");
            None
        }
    }
}

/// Parsed diffstat block: ordered file list plus total counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diffstat {
    pub files: Vec<String>,
    pub added: u64,
    pub removed: u64,
}

/// Parse one commit's diffstat block.
///
/// Line 1 is the change summary, e.g.
/// ` 3 files changed, 29 insertions(+), 29 deletions(-)`; the lines after
/// it up to (excluding) the final line are `<path> | <changes>` entries.
///
/// With a single extra summary field its suffix decides whether it is the
/// insertions or deletions count. With two extra fields the first is taken
/// as insertions and the second as deletions by position alone; git always
/// prints them in that order when both are present, and this parser leans
/// on that ordering rather than re-checking the suffixes. Non-numeric
/// counts silently become 0.
pub fn parse_diffstat(text: &str) -> Diffstat {
    if text.is_empty() {
        log::error!("degenerate diffstat block: no summary line");
        return Diffstat::default();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let fields: Vec<&str> = lines[0].split(',').collect();

    let mut added = 0;
    let mut removed = 0;
    match fields.len() {
        2 => {
            if let Some(n) = fields[1].strip_suffix(" insertions(+)") {
                added = parse_count(n);
            } else if let Some(n) = fields[1].strip_suffix(" deletions(-)") {
                removed = parse_count(n);
            }
        }
        3 => {
            added = parse_count(fields[1].strip_suffix(" insertions(+)").unwrap_or(fields[1]));
            removed = parse_count(fields[2].strip_suffix(" deletions(-)").unwrap_or(fields[2]));
        }
        _ => {}
    }

    // The final line is the trailing blank of the block and never a file
    // entry, so it is excluded unconditionally.
    let mut files = Vec::new();
    if lines.len() > 1 {
        for line in &lines[1..lines.len() - 1] {
            if let Some((path, _)) = line.split_once('|') {
                files.push(path.trim().to_string());
            }
        }
    }

    Diffstat { files, added, removed }
}

fn parse_count(field: &str) -> u64 {
    match field.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            log::debug!("non-numeric diffstat count {field:?}, defaulting to 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn author_line_yields_email() {
        assert_eq!(
            parse_author("Author: devopswizards <devops@ajaib.co.id>"),
            Some("devops@ajaib.co.id")
        );
        assert_eq!(
            parse_author("Author: Elan Qisthi <elan.aji@ajaib.co.id>"),
            Some("elan.aji@ajaib.co.id")
        );
    }

    #[test]
    fn author_recognition_is_prefix_anchored() {
        assert_eq!(parse_author("commit 569eec0afc4f844ce5be48b8b18c145352583e3e"), None);
        assert_eq!(parse_author("Date:   Thu Feb 22 12:07:44 2024 +0700"), None);
        // "Author" as a substring is not enough
        assert_eq!(parse_author("Co-Author: X <x@y.z>"), None);
        assert_eq!(parse_author("    Author: X <x@y.z>"), None);
    }

    #[test]
    fn author_line_without_brackets_yields_none() {
        assert_eq!(parse_author("Author: anonymous"), None);
        assert_eq!(parse_author("Author: empty <>"), None);
    }

    #[test]
    fn commit_line_yields_trimmed_id() {
        assert_eq!(
            parse_commit("commit 569eec0afc4f844ce5be48b8b18c145352583e3e"),
            Some("569eec0afc4f844ce5be48b8b18c145352583e3e")
        );
        assert_eq!(parse_commit("commit   abc123  "), Some("abc123"));
    }

    #[test]
    fn commit_recognition_is_prefix_anchored() {
        assert_eq!(parse_commit("Author: devopswizards <devops@ajaib.co.id>"), None);
        assert_eq!(parse_commit("Date:   Thu Feb 22 12:07:44 2024 +0700"), None);
        assert_eq!(parse_commit("commit"), None);
    }

    #[test]
    fn date_line_round_trips_through_log_format() {
        let ts = parse_date("Date:   Thu Feb 1 12:07:44 2024 +0700").unwrap();
        assert_eq!(
            ts.format("%a %b %-d %H:%M:%S %Y %z").to_string(),
            "Thu Feb 1 12:07:44 2024 +0700"
        );
    }

    #[test]
    fn non_date_lines_yield_none() {
        assert_eq!(parse_date("Author: devopswizards <devops@ajaib.co.id>"), None);
        assert_eq!(parse_date("commit 569eec0afc4f844ce5be48b8b18c145352583e3e"), None);
        assert_eq!(parse_date("Date:   not a timestamp"), None);
    }

    const DIFFSTAT_BOTH: &str = " 3 files changed, 29 insertions(+), 29 deletions(-)
 pom.xml                |  4 ++--
 odt-web-app/pom.xml    |  8 ++++----
 odt-service/pom.xml    | 18 +++++++++---------
";

    #[test]
    fn diffstat_with_both_counts() {
        let stat = parse_diffstat(DIFFSTAT_BOTH);
        assert_eq!(
            stat.files,
            vec!["pom.xml", "odt-web-app/pom.xml", "odt-service/pom.xml"]
        );
        assert_eq!(stat.added, 29);
        assert_eq!(stat.removed, 29);
    }

    #[test]
    fn diffstat_with_only_deletions() {
        let stat = parse_diffstat(
            " 3 files changed, 29 deletions(-)\n pom.xml    |  4 ++--\n",
        );
        assert_eq!(stat.added, 0);
        assert_eq!(stat.removed, 29);
        assert_eq!(stat.files, vec!["pom.xml"]);
    }

    #[test]
    fn diffstat_with_only_insertions() {
        let stat = parse_diffstat(
            " 3 files changed, 29 insertions(+)\n pom.xml    |  4 ++--\n",
        );
        assert_eq!(stat.added, 29);
        assert_eq!(stat.removed, 0);
    }

    #[test]
    fn diffstat_unknown_extra_field_leaves_counts_zero() {
        let stat = parse_diffstat(" 1 file changed, something else\n a.txt | 1 +\n");
        assert_eq!(stat.added, 0);
        assert_eq!(stat.removed, 0);
    }

    #[test]
    fn diffstat_non_numeric_count_defaults_to_zero() {
        let stat =
            parse_diffstat(" 2 files changed, x insertions(+), 7 deletions(-)\n a | 1\n");
        assert_eq!(stat.added, 0);
        assert_eq!(stat.removed, 7);
    }

    #[test]
    fn diffstat_lines_without_pipe_are_skipped() {
        let stat = parse_diffstat(
            " 1 file changed, 2 insertions(+)\n a.txt | 2 ++\n stray line\n",
        );
        assert_eq!(stat.files, vec!["a.txt"]);
    }

    #[test]
    fn diffstat_degenerate_input_is_empty() {
        assert_eq!(parse_diffstat(""), Diffstat::default());
    }

    #[test]
    fn diffstat_summary_only_has_no_files() {
        let stat = parse_diffstat(" 0 files changed\n");
        assert_eq!(stat, Diffstat::default());
    }
}
