//! Output formatting for the CLI.

use std::time::Duration;

use catalog_core::ConfigError;
use catalog_graph::FetchError;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::render::ScreenError;

/// A failed command as printed to stderr in JSON mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// `config`, `transport`, `remote`, `not_found`, `request`, `usage`,
    /// or `command` when nothing more specific applies.
    pub kind: &'static str,
    pub message: String,
}

impl ErrorReport {
    /// Classify by the first typed error in the chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let kind = err
            .chain()
            .find_map(|cause| {
                if let Some(e) = cause.downcast_ref::<ScreenError>() {
                    Some(e.kind())
                } else if let Some(e) = cause.downcast_ref::<FetchError>() {
                    Some(e.kind().as_str())
                } else {
                    cause.downcast_ref::<ConfigError>().map(|e| e.kind().as_str())
                }
            })
            .unwrap_or("command");

        Self {
            kind,
            message: format!("{:#}", err),
        }
    }
}

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Report a failed command. JSON mode writes one [`ErrorReport`] line.
    pub fn failure(&self, err: &anyhow::Error) {
        let report = ErrorReport::from_error(err);
        if self.json {
            if let Ok(line) = serde_json::to_string(&report) {
                eprintln!("{}", line);
            }
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(&report.message).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print plain text, indented.
    pub fn text(&self, msg: &str) {
        if self.json {
            return;
        }
        for line in msg.lines() {
            println!("  {}", line);
        }
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Create a spinner for a pending request.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
