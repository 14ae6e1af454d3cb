//! Synchronous external tool invocation.
//!
//! Every subprocess the pipeline starts goes through [`ToolRunner`], so the
//! exact argument lists can be asserted in tests without the real tools
//! installed.

use std::process::{Command, Stdio};

use crate::error::{ReelError, ReelResult};

/// A program plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run this invocation through a launcher such as `xvfb-run`.
    ///
    /// The result is `launcher launcher_args... program args...`.
    pub fn wrapped_in(self, launcher: Invocation) -> Invocation {
        let mut args = launcher.args;
        args.push(self.program);
        args.extend(self.args);
        Invocation {
            program: launcher.program,
            args,
        }
    }

    /// The command as `echo` would print it: program and args joined by spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("status {code}"),
            None => "signal".to_string(),
        }
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Turn a non-zero exit into [`ReelError::ToolFailed`].
    pub fn ensure_success(self, program: &str) -> ReelResult<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(ReelError::ToolFailed {
            program: program.to_string(),
            status: self.status_label(),
            stderr: self.stderr_lossy().trim().to_string(),
        })
    }
}

/// Runs external programs to completion.
pub trait ToolRunner {
    /// Block until the program exits. Failing to start it is an error; a
    /// non-zero exit is not.
    fn run(&self, invocation: &Invocation) -> ReelResult<ToolOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, invocation: &Invocation) -> ReelResult<ToolOutput> {
        (**self).run(invocation)
    }
}

/// [`ToolRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> ReelResult<ToolOutput> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, "Running tool");
        let start = std::time::Instant::now();

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ReelError::tool(&invocation.program, e.to_string()))?;

        tracing::debug!(
            program = %invocation.program,
            code = ?output.status.code(),
            elapsed_ms = start.elapsed().as_millis(),
            "Tool exited"
        );

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Whether `binary` resolves on `PATH`.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_is_space_joined() {
        let inv = Invocation::new("git").args(["log", "--pretty=format:%ae!%an"]);
        assert_eq!(inv.command_line(), "git log --pretty=format:%ae!%an");
    }

    #[test]
    fn test_wrapped_in_prepends_launcher() {
        let inv = Invocation::new("gource").arg("-64x64");
        let wrapped = inv.wrapped_in(Invocation::new("xvfb-run").args(["-a", "-s", "-screen 0 64x64x24"]));
        assert_eq!(wrapped.program, "xvfb-run");
        assert_eq!(
            wrapped.args,
            vec!["-a", "-s", "-screen 0 64x64x24", "gource", "-64x64"]
        );
    }

    #[test]
    fn test_ensure_success_reports_stderr() {
        let output = ToolOutput {
            code: Some(1),
            stdout: Vec::new(),
            stderr: b"boom\n".to_vec(),
        };
        match output.ensure_success("ffmpeg") {
            Err(ReelError::ToolFailed {
                program,
                status,
                stderr,
            }) => {
                assert_eq!(program, "ffmpeg");
                assert_eq!(status, "status 1");
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_streams_and_code() {
        let inv = Invocation::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = SystemRunner.run(&inv).unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout_lossy(), "out\n");
        assert_eq!(output.stderr_lossy(), "err\n");
        assert!(!output.success());
    }

    #[test]
    fn test_system_runner_missing_program_is_error() {
        let inv = Invocation::new("reel-definitely-not-installed");
        assert!(matches!(
            SystemRunner.run(&inv),
            Err(ReelError::Tool { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("reel-definitely-not-installed"));
    }
}
