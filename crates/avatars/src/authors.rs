//! Commit-log author extraction.

use std::collections::HashSet;

use reel_common::error::{ReelError, ReelResult};
use reel_common::process::{Invocation, ToolRunner};

/// Pretty format producing one `email!name` line per commit.
pub const AUTHOR_LOG_FORMAT: &str = "--pretty=format:%ae!%an";

/// A commit author as it first appears in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Email exactly as logged.
    pub email: String,
    /// Trimmed display name; the uniqueness key.
    pub name: String,
}

/// The `git log` invocation listing every commit's author.
pub fn commit_log_invocation(git: &str) -> Invocation {
    Invocation::new(git).args(["log", AUTHOR_LOG_FORMAT])
}

/// Read the author log of the repository in the current directory.
pub fn read_commit_log<R: ToolRunner>(runner: &R, git: &str) -> ReelResult<String> {
    let invocation = commit_log_invocation(git);
    let output = runner
        .run(&invocation)
        .map_err(|e| ReelError::commit_log(e.to_string()))?;

    if !output.success() {
        return Err(ReelError::commit_log(format!(
            "{} exited with {}: {}",
            invocation.command_line(),
            output.status_label(),
            output.stderr_lossy().trim()
        )));
    }

    Ok(output.stdout_lossy())
}

/// Split `email!name` lines and keep the first entry for every name.
pub fn parse_authors(log: &str) -> Vec<Author> {
    let mut seen = HashSet::new();
    let mut authors = Vec::new();

    for line in log.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((email, name)) = line.split_once('!') else {
            tracing::debug!(line, "Skipping commit-log line without separator");
            continue;
        };

        let name = name.trim();
        if !seen.insert(name.to_string()) {
            continue;
        }
        authors.push(Author {
            email: email.to_string(),
            name: name.to_string(),
        });
    }

    authors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reel_common::process::ToolOutput;

    struct CannedLog(ReelResult<ToolOutput>);

    impl ToolRunner for CannedLog {
        fn run(&self, invocation: &Invocation) -> ReelResult<ToolOutput> {
            assert_eq!(invocation.args, vec!["log", AUTHOR_LOG_FORMAT]);
            match &self.0 {
                Ok(output) => Ok(output.clone()),
                Err(_) => Err(ReelError::tool(&invocation.program, "not found")),
            }
        }
    }

    #[test]
    fn test_first_email_wins_for_duplicate_names() {
        let log = "ada@old.example!Ada\nbob@example.org!Bob\nada@new.example!Ada";
        let authors = parse_authors(log);
        assert_eq!(
            authors,
            vec![
                Author {
                    email: "ada@old.example".to_string(),
                    name: "Ada".to_string(),
                },
                Author {
                    email: "bob@example.org".to_string(),
                    name: "Bob".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_names_are_trimmed_before_dedup() {
        let authors = parse_authors("a@x!Ada \nb@x! Ada");
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Ada");
        assert_eq!(authors[0].email, "a@x");
    }

    #[test]
    fn test_name_may_contain_separator() {
        let authors = parse_authors("a@x!Ada!Lovelace");
        assert_eq!(authors[0].name, "Ada!Lovelace");
    }

    #[test]
    fn test_lines_without_separator_are_skipped() {
        let authors = parse_authors("garbage\n\nc@x!Cy");
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Cy");
    }

    #[test]
    fn test_read_commit_log_returns_stdout() {
        let runner = CannedLog(Ok(ToolOutput {
            code: Some(0),
            stdout: b"a@x!Ada".to_vec(),
            stderr: Vec::new(),
        }));
        assert_eq!(read_commit_log(&runner, "git").unwrap(), "a@x!Ada");
    }

    #[test]
    fn test_read_commit_log_non_zero_exit_is_fatal() {
        let runner = CannedLog(Ok(ToolOutput {
            code: Some(128),
            stdout: Vec::new(),
            stderr: b"fatal: not a git repository".to_vec(),
        }));
        let err = read_commit_log(&runner, "git").unwrap_err();
        assert!(matches!(err, ReelError::CommitLog { .. }));
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn test_read_commit_log_spawn_failure_is_fatal() {
        let runner = CannedLog(Err(ReelError::tool("git", "not found")));
        assert!(matches!(
            read_commit_log(&runner, "git"),
            Err(ReelError::CommitLog { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_every_name_appears_once(names in prop::collection::vec("[A-Za-z]{1,6}", 0..20)) {
            let log = names
                .iter()
                .enumerate()
                .map(|(i, name)| format!("user{i}@example.org!{name}"))
                .collect::<Vec<_>>()
                .join("\n");
            let authors = parse_authors(&log);

            let unique: HashSet<&String> = names.iter().collect();
            prop_assert_eq!(authors.len(), unique.len());
            for author in &authors {
                let first = names.iter().position(|n| n == &author.name).unwrap();
                prop_assert_eq!(&author.email, &format!("user{first}@example.org"));
            }
        }
    }
}
