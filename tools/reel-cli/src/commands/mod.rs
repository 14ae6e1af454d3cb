pub mod avatars;
pub mod check;
pub mod count_frames;
pub mod init;
pub mod make;
pub mod plan;

use reel_common::error::ReelError;

/// Exit status when the commit log cannot be read.
pub(crate) const COMMIT_LOG_EXIT: u8 = 1;

/// Report an unreadable commit log on stderr and pick the exit status.
///
/// Returns `None` for every other error so `main` can report it normally.
pub(crate) fn commit_log_exit(err: &anyhow::Error) -> Option<u8> {
    let ReelError::CommitLog { message } = err.downcast_ref::<ReelError>()? else {
        return None;
    };
    eprintln!("ERROR: Unable to read git log.");
    eprintln!("  cause: {message}");
    tracing::debug!(%message, "Commit log unavailable");
    Some(COMMIT_LOG_EXIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_log_error_exits_with_one() {
        let err = anyhow::Error::from(ReelError::commit_log("git: not found"));
        assert_eq!(commit_log_exit(&err), Some(1));
    }

    #[test]
    fn test_other_errors_are_left_to_main() {
        let err = anyhow::Error::from(ReelError::config("bad fps"));
        assert_eq!(commit_log_exit(&err), None);
        assert_eq!(commit_log_exit(&anyhow::anyhow!("plain")), None);
    }
}
