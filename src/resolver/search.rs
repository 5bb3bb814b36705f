//! Search backends used to look color names up.

use std::process::Command;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::process::{command_exists, run_with_timeout};

/// Errors from a search backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search backend not available: {0}")]
    NotAvailable(String),

    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("search command exited with code {code}: {stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("search failed: {0}")]
    Failed(String),
}

/// Free-text search: a query in, unstructured text out.
///
/// Nothing is assumed about the returned text; it may or may not contain a
/// usable triple.
pub trait Search: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;

    /// Run one query.
    fn search(&self, query: &str) -> Result<String, SearchError>;
}

/// Run `search` on a worker thread and give up after `timeout`.
///
/// A backend that hangs is abandoned, not cancelled: its thread keeps running
/// until the backend returns, and the late result is dropped.
pub fn search_with_timeout(
    search: Arc<dyn Search>,
    query: &str,
    timeout: Duration,
) -> Result<String, SearchError> {
    let (result_tx, result_rx) = mpsc::channel();
    let query = query.to_string();

    thread::Builder::new()
        .name("color-lookup".to_string())
        .spawn(move || {
            // Ignore send errors (caller may have timed out)
            let _ = result_tx.send(search.search(&query));
        })
        .map_err(|e| SearchError::Failed(format!("failed to spawn lookup thread: {}", e)))?;

    match result_rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(SearchError::Timeout(timeout)),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(SearchError::Failed("lookup thread exited without a result".to_string()))
        }
    }
}

/// Search by running an external command with the query as its last argument.
///
/// Works with any CLI that prints results to stdout, e.g. `ddgr --json`.
#[derive(Debug, Clone)]
pub struct CommandSearch {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSearch {
    /// Create from a full argv; the first element is the program.
    ///
    /// Returns `None` for an empty argv.
    pub fn from_argv(argv: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    /// The program that will be invoked.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Search for CommandSearch {
    fn name(&self) -> &'static str {
        "command"
    }

    fn search(&self, query: &str) -> Result<String, SearchError> {
        if !command_exists(&self.program) {
            return Err(SearchError::NotAvailable(format!(
                "{} not found in PATH",
                self.program
            )));
        }

        let output = run_with_timeout(
            Command::new(&self.program).args(&self.args).arg(query),
            self.timeout,
        )
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::TimedOut => SearchError::Timeout(self.timeout),
            _ => SearchError::Failed(e.to_string()),
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(SearchError::ExitCode {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Stand-in used when no search command is configured.
///
/// Every lookup fails as not available, so explicit triples keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearch;

impl Search for NoSearch {
    fn name(&self) -> &'static str {
        "none"
    }

    fn search(&self, _query: &str) -> Result<String, SearchError> {
        Err(SearchError::NotAvailable(
            "no search command configured".to_string(),
        ))
    }
}
