//! Optional compile check for generated TypeScript.
//!
//! Isolated behind the [`CompileChecker`] trait so validation tests can
//! stub it without spawning processes. The real checker writes the code
//! to a scratch temp directory, runs `tsc --noEmit --skipLibCheck`, and
//! enforces a hard timeout with a guaranteed kill. Temp cleanup happens
//! on every exit path via `TempDir`'s drop, which swallows cleanup
//! errors.
//!
//! The check can never produce a hard validation error: missing CDK
//! modules are expected in the execution sandbox and a missing compiler
//! just skips the check.

use crate::generator::validator::patterns;
use log::debug;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Outcome of a compile check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Compiler exited zero.
    Passed,
    /// Compiler failed only because the CDK libraries are not installed.
    MissingDependencies { detail: String },
    /// Compiler reported real problems.
    Failed { output: String },
    /// Compiler ran past the timeout and was killed.
    TimedOut { seconds: u64 },
    /// Check could not run at all (no compiler, temp dir failure).
    Skipped { reason: String },
}

/// Interface for syntax-checking generated code.
pub trait CompileChecker {
    fn check(&self, code: &str) -> CompileOutcome;
}

/// Compile checker backed by the TypeScript compiler.
pub struct TscCompileChecker {
    command: String,
    timeout: Duration,
}

impl Default for TscCompileChecker {
    fn default() -> Self {
        Self {
            command: "tsc".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl TscCompileChecker {
    #[cfg(test)]
    fn with_command(command: &str, timeout: Duration) -> Self {
        Self {
            command: command.to_string(),
            timeout,
        }
    }
}

impl CompileChecker for TscCompileChecker {
    fn check(&self, code: &str) -> CompileOutcome {
        let scratch = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return CompileOutcome::Skipped {
                    reason: format!("could not create scratch directory: {}", e),
                };
            }
        };

        let source_path = scratch.path().join("stack.ts");
        if let Err(e) = std::fs::write(&source_path, code) {
            return CompileOutcome::Skipped {
                reason: format!("could not write scratch file: {}", e),
            };
        }

        let mut child = match Command::new(&self.command)
            .arg("--noEmit")
            .arg("--skipLibCheck")
            .arg(&source_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return CompileOutcome::Skipped {
                    reason: format!("TypeScript compiler '{}' is not installed", self.command),
                };
            }
            Err(e) => {
                return CompileOutcome::Skipped {
                    reason: format!("could not start '{}': {}", self.command, e),
                };
            }
        };

        // Drain pipes on threads so a chatty compiler cannot deadlock
        // against a full pipe buffer while we poll.
        let stdout_handle = child.stdout.take().map(spawn_reader);
        let stderr_handle = child.stderr.take().map(spawn_reader);

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return CompileOutcome::TimedOut {
                            seconds: self.timeout.as_secs(),
                        };
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return CompileOutcome::Skipped {
                        reason: format!("could not wait for compiler: {}", e),
                    };
                }
            }
        };

        let mut output = String::new();
        for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
            if let Ok(chunk) = handle.join() {
                output.push_str(&chunk);
            }
        }

        debug!(
            "compile check exited with {} after {:?}",
            status,
            started.elapsed()
        );

        if status.success() {
            CompileOutcome::Passed
        } else if patterns::indicates_missing_module(&output) {
            CompileOutcome::MissingDependencies { detail: output }
        } else {
            CompileOutcome::Failed { output }
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buffer = String::new();
        let _ = reader.read_to_string(&mut buffer);
        buffer
    })
}
