//! Response queries through an external jq-compatible processor.
//!
//! The processor runs as `<exe> -r <query>` with the JSON text on its
//! standard input. Standard output is captured up to a size cap. The call
//! blocks until the process exits; there is no timeout.

use crate::config::ApiCliConfig;
use log::debug;
use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use thiserror::Error;

/// Default cap on captured standard output (50 MiB).
pub const DEFAULT_MAX_OUTPUT: usize = 50 * 1024 * 1024;

/// Default processor executable.
pub const DEFAULT_JQ: &str = "jq";

/// Errors that can occur while running a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The processor could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The processor exited unsuccessfully.
    #[error("{}", failure_message(.status, .stderr))]
    Failed { status: ExitStatus, stderr: String },

    /// Standard output exceeded the configured cap.
    #[error("Query output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },

    /// Reading from or writing to the processor failed.
    #[error("Query I/O error: {0}")]
    Io(#[from] io::Error),
}

fn failure_message(status: &ExitStatus, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("jq exited {}", status)
    } else {
        stderr.to_string()
    }
}

/// Runs queries with a given processor executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEngine {
    program: String,
    max_output: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_JQ)
    }
}

impl QueryEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }

    pub fn from_config(config: &ApiCliConfig) -> Self {
        Self::new(config.jq_path.clone()).with_max_output(config.max_query_output)
    }

    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs `query` over `json_text` and returns the processor's output.
    ///
    /// A query not starting with `.` gets one prepended, so `data[0].id`
    /// runs as `.data[0].id`.
    ///
    /// # Errors
    ///
    /// Fails when the processor cannot be spawned, exits non-zero (carrying
    /// its standard error), or writes more than the output cap.
    pub fn run_jq(&self, query: &str, json_text: &str) -> Result<String, QueryError> {
        let query = normalize_query(query);
        debug!("Running {} -r {}", self.program, query);

        let mut child = Command::new(&self.program)
            .arg("-r")
            .arg(&query)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| QueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let (Some(mut stdin), Some(stdout), Some(mut stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            let _ = child.kill();
            return Err(QueryError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "query processor pipes unavailable",
            )));
        };

        // Feed stdin and drain stderr on their own threads so a large input
        // or a chatty processor cannot block the stdout read.
        let input = json_text.to_owned();
        let writer = thread::spawn(move || {
            // A processor that exits early closes the pipe; its exit status reports why
            let _ = stdin.write_all(input.as_bytes());
        });
        let stderr_reader = thread::spawn(move || {
            let mut text = String::new();
            let _ = stderr.read_to_string(&mut text);
            text
        });

        let mut output = Vec::new();
        let limit = self.max_output as u64;
        stdout.take(limit + 1).read_to_end(&mut output)?;

        if output.len() as u64 > limit {
            let _ = child.kill();
            let _ = child.wait();
            return Err(QueryError::OutputTooLarge {
                limit: self.max_output,
            });
        }

        let status = child.wait()?;
        let _ = writer.join();
        let stderr = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            debug!("Query failed with {}: {}", status, stderr.trim());
            return Err(QueryError::Failed { status, stderr });
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Prefixes `query` with `.` unless it already starts with one.
pub fn normalize_query(query: &str) -> String {
    if query.starts_with('.') {
        query.to_string()
    } else {
        format!(".{}", query)
    }
}

/// Runs a query with the default `jq` executable.
pub fn run_jq(query: &str, json_text: &str) -> Result<String, QueryError> {
    QueryEngine::default().run_jq(query, json_text)
}
