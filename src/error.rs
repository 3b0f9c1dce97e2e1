//! Error types for the status bar.
//!
//! Bad indices and missing tags are not errors: lookups return `Option` and
//! removals are no-ops. Errors cover stale handles, rejected duplicate tags,
//! and bad configuration.

use crate::widget::SegmentId;
use std::path::PathBuf;
use thiserror::Error;

/// A color identifier that is neither a palette index nor a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color identifier {input:?}")]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected identifier.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Invalid construction options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options file exists but could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// Path of the options file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The options are not valid TOML, or a value is out of range.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The bar must be at least one row tall.
    #[error("bar height must be at least 1 row")]
    ZeroHeight,
}

/// Errors raised by status bar operations.
#[derive(Debug, Error)]
pub enum BarError {
    /// The handle refers to a segment that was removed.
    #[error("no segment with id {0}")]
    UnknownSegment(SegmentId),

    /// Another segment already holds this tag and the bar rejects duplicates.
    #[error("tag {tag:?} is already registered")]
    DuplicateTag {
        /// The contested tag.
        tag: String,
    },

    /// The bar could not be built from its options.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias defaulting to [`BarError`].
pub type Result<T, E = BarError> = std::result::Result<T, E>;
