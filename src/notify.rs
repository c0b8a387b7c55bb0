//! Decision notifications (durable log plus operator echo).
//!
//! Every call appends one line to the durable log. The line is also echoed on
//! stderr when an operator is watching: stdin is a terminal, or the call was
//! chained from a dispatcher that shows our output. Failures only produce a
//! warning; the verdict is already decided when we get here.

use anyhow::{Context, Result};
use chrono::Local;
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cmd_abstraction::{args_to_strings, CommandExecutor, RealCommandExecutor};
use crate::config::LogConfig;
use crate::error::GeogateError;

#[cfg(test)]
use mockall::automock;

/// Tag used for syslog and the file log prefix
pub const LOG_TAG: &str = "geogate";

/// Side channel for human-readable decision messages
#[cfg_attr(test, automock)]
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Where the durable copy of each message goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurableLog {
    /// Append-only file, locked per line
    File(PathBuf),
    /// `logger(1)` on the auth facility
    Syslog,
}

impl From<&LogConfig> for DurableLog {
    fn from(config: &LogConfig) -> Self {
        if config.syslog {
            DurableLog::Syslog
        } else {
            DurableLog::File(config.file.clone())
        }
    }
}

/// Whether this process was started from an interactive terminal
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

pub struct LogNotifier<E: CommandExecutor = RealCommandExecutor> {
    durable: DurableLog,
    echo: bool,
    executor: E,
}

impl LogNotifier<RealCommandExecutor> {
    pub fn new(durable: DurableLog, echo: bool) -> Self {
        Self::with_executor(durable, echo, RealCommandExecutor::new())
    }
}

impl<E: CommandExecutor> LogNotifier<E> {
    pub fn with_executor(durable: DurableLog, echo: bool, executor: E) -> Self {
        Self {
            durable,
            echo,
            executor,
        }
    }

    fn write_durable(&self, message: &str) -> Result<()> {
        match &self.durable {
            DurableLog::File(path) => append_line(path, &format_log_line(message)),
            DurableLog::Syslog => {
                let args = args_to_strings(&["-t", LOG_TAG, "-p", "auth.notice"]);
                let output = self
                    .executor
                    .execute_with_stdin(Path::new("logger"), &args, message)
                    .context("Failed to run logger")?;
                if !output.success {
                    return Err(GeogateError::Notify(format!(
                        "logger exited with {:?}: {}",
                        output.code,
                        output.stderr.trim()
                    ))
                    .into());
                }
                Ok(())
            }
        }
    }
}

impl<E: CommandExecutor> Notifier for LogNotifier<E> {
    fn notify(&self, message: &str) {
        if let Err(e) = self.write_durable(message) {
            warn!("Could not record decision: {:#}", e);
        }

        if self.echo {
            eprintln!("{}", message);
        }
    }
}

/// Prefix a message the way syslog would render it
fn format_log_line(message: &str) -> String {
    format!(
        "{} {}[{}]: {}\n",
        Local::now().format("%b %e %H:%M:%S"),
        LOG_TAG,
        std::process::id(),
        message
    )
}

/// Append one line under an exclusive lock so concurrent gates don't interleave
fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    file.lock_exclusive()
        .with_context(|| format!("Failed to lock log file: {:?}", path))?;
    let result = file
        .write_all(line.as_bytes())
        .with_context(|| format!("Failed to write log file: {:?}", path));
    // Closing the file releases the lock as well
    let _ = file.unlock();

    result
}
