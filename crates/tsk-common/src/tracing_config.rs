//! Tracing configuration.
//!
//! Output format is selected with `TSK_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`, handy for following a
//!   single source file through the rewrite
//! - `json`: one JSON object per event
//!
//! ```bash
//! TSK_LOG=debug TSK_LOG_FORMAT=tree cargo test -p tskeys
//! TSK_LOG="tsk_transform=trace,tsk_checker=debug" cargo test
//! ```
//!
//! Nothing is installed unless `TSK_LOG` or `RUST_LOG` is present.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var("TSK_LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// `TSK_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(directives) = std::env::var("TSK_LOG") {
        return Some(EnvFilter::builder().parse_lossy(directives));
    }
    if std::env::var("RUST_LOG").is_ok() {
        return Some(EnvFilter::from_default_env());
    }
    None
}

/// Install the global tracing subscriber.
///
/// Returns `false` when logging was not requested or a subscriber is already
/// installed, so repeated calls (one per test binary, say) are harmless.
/// Everything is written to stderr.
pub fn init_tracing() -> bool {
    let Some(filter) = build_filter() else {
        return false;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true)
                .with_writer(std::io::stderr);
            Registry::default()
                .with(filter)
                .with(tree_layer)
                .try_init()
                .is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default()
                .with(filter)
                .with(json_layer)
                .try_init()
                .is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }
}
