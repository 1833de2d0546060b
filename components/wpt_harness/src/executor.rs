//! Bounded engine invocation

use crate::error::ExecError;
use crate::wrapper::WrapperUnit;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default per-test wall-clock budget
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between exit polls
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Output captured from a completed engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured stdout, invalid UTF-8 replaced
    pub stdout: String,
    /// Captured stderr, invalid UTF-8 replaced
    pub stderr: String,
    /// Exit code; `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    /// Check if the process exited with status zero
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// What happened when the engine was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// The engine exited within budget
    Completed(ExecutionResult),
    /// The budget ran out and the engine was killed
    TimedOut(Duration),
}

/// Runs the engine executable against wrapper files
#[derive(Debug, Clone)]
pub struct Engine {
    executable: PathBuf,
    working_dir: PathBuf,
    timeout: Duration,
}

impl Engine {
    /// Create an engine runner; tests run with `working_dir` as the current directory
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(executable: P, working_dir: Q) -> Self {
        Self {
            executable: executable.into(),
            working_dir: working_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-test budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the per-test budget
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the executable path
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run a wrapper, consuming it; the wrapper file is removed on every path out
    pub fn run(&self, unit: WrapperUnit) -> Result<Execution, ExecError> {
        let result = self.run_script(unit.path());
        drop(unit);
        result
    }

    /// Run the engine with `script` as its sole argument.
    ///
    /// The budget covers both the engine's exit and the draining of its
    /// output, so a descendant holding a pipe open cannot outlive it.
    pub fn run_script(&self, script: &Path) -> Result<Execution, ExecError> {
        let mut command = Command::new(&self.executable);
        command
            .arg(script)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            engine: self.executable.clone(),
            source,
        })?;

        // Drain pipes concurrently so a chatty test cannot block on a full pipe
        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Stream::Stdout, tx.clone());
        drain(child.stderr.take(), Stream::Stderr, tx);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        return Ok(self.time_out(&mut child, script));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    kill(&mut child);
                    return Err(ExecError::Wait(e));
                }
            }
        };

        match collect(&rx, deadline) {
            Some((stdout, stderr)) => Ok(Execution::Completed(ExecutionResult {
                stdout,
                stderr,
                exit_code: status.code(),
            })),
            None => Ok(self.time_out(&mut child, script)),
        }
    }

    fn time_out(&self, child: &mut Child, script: &Path) -> Execution {
        kill(child);
        debug!(script = %script.display(), "engine killed after budget");
        Execution::TimedOut(self.timeout)
    }
}

/// Which pipe a drained buffer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Kill the engine and everything left in its process group
fn kill(child: &mut Child) {
    #[cfg(unix)]
    {
        // The engine leads its own group, so the group id is its pid
        let _ = Command::new("kill")
            .args(["-s", "KILL", "--", &format!("-{}", child.id())])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) {
    let Some(mut pipe) = pipe else {
        let _ = tx.send((stream, Vec::new()));
        return;
    };
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, buf));
    });
}

/// Wait for both pipes to close; `None` if the deadline passes first
fn collect(rx: &Receiver<(Stream, Vec<u8>)>, deadline: Instant) -> Option<(String, String)> {
    let mut stdout = None;
    let mut stderr = None;

    while stdout.is_none() || stderr.is_none() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, bytes)) => stdout = Some(bytes),
            Ok((Stream::Stderr, bytes)) => stderr = Some(bytes),
            Err(RecvTimeoutError::Timeout) => return None,
            // A reader thread died without sending; treat its stream as empty
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let decode = |bytes: Option<Vec<u8>>| {
        bytes
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    };
    Some((decode(stdout), decode(stderr)))
}
