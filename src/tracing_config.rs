//! Logging for table builds.
//!
//! `CSYM_LOG` selects what is logged. A bare level such as `debug` is scoped to
//! the pipeline crates only:
//!
//! ```bash
//! # Scope enter/exit and every insert, for the parser and binder
//! CSYM_LOG=debug csymtab 'int foo(int a) { int x; }'
//!
//! # Full directive syntax is passed through unchanged
//! CSYM_LOG="csym_binder=trace,csym_parser=info" csymtab --file input.c
//! ```
//!
//! `CSYM_LOG_FORMAT` picks the layout: `text` (default), `tree` to nest the
//! binder's scope events under their `bind_translation_unit` span, or `json`
//! for tooling. `RUST_LOG` is honoured as-is when `CSYM_LOG` is unset.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Targets a bare `CSYM_LOG` level applies to.
pub const PIPELINE_TARGETS: &[&str] = &["csymtab", "csym_scanner", "csym_parser", "csym_binder"];

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Binder scopes as an indented tree.
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `CSYM_LOG_FORMAT` value; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("CSYM_LOG_FORMAT").unwrap_or_default())
    }
}

/// Filter directives for the given `CSYM_LOG` and `RUST_LOG` values, or `None`
/// when logging stays off.
pub fn filter_directives(csym_log: Option<&str>, rust_log: Option<&str>) -> Option<String> {
    match csym_log.map(str::trim) {
        Some(level) if LEVELS.contains(&level.to_lowercase().as_str()) => Some(
            PIPELINE_TARGETS
                .iter()
                .map(|target| format!("{target}={}", level.to_lowercase()))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(directives) => Some(directives.to_string()),
        None => rust_log.map(str::to_string),
    }
}

/// Install the global subscriber, writing to stderr so logs never mix with
/// the tables on stdout. Does nothing when neither variable is set.
pub fn init_tracing() {
    let csym_log = std::env::var("CSYM_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(directives) = filter_directives(csym_log.as_deref(), rust_log.as_deref()) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
