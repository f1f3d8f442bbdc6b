//! Error types for grammar resolution
//!
//! Every error here is scoped to a single descriptor (or a single grammar file):
//! a failure never leaves a grammar half-updated, so callers are free to report
//! and move on.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve one descriptor against one grammar.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The pattern text is not a valid regular expression.
    #[error("regex syntax error in pattern `{pattern}`")]
    PatternSyntax {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A category name has no entry in the category registry.
    #[error("unknown token category: {name}")]
    UnknownCategory { name: String },

    /// The grammar has no state with this name.
    #[error("state not found: {name}")]
    StateNotFound { name: String },

    /// A rule was constructed without any token category.
    #[error("rule for pattern `{pattern}` declares no token categories")]
    NoCategories { pattern: String },
}

impl ResolveError {
    /// The underlying regex diagnostic, for pattern syntax errors.
    pub fn syntax_detail(&self) -> Option<String> {
        match self {
            ResolveError::PatternSyntax { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

/// A descriptor could not be constructed from its raw parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("target state name is empty")]
    EmptyStateName,

    #[error("pattern is empty")]
    EmptyPattern,

    #[error("rule for pattern `{pattern}` must tag at least one token category")]
    NoCategories { pattern: String },

    #[error("invalid state transition: {0}")]
    InvalidTransition(String),
}

/// Aborted grammar build (first failure under [`FailurePolicy::Abort`]).
///
/// [`FailurePolicy::Abort`]: crate::lexgram::builder::FailurePolicy::Abort
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("rule #{index} ({descriptor}) failed to resolve")]
    Resolution {
        index: usize,
        descriptor: String,
        #[source]
        source: ResolveError,
    },
}

/// Failure to read a grammar definition file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML grammar definition")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON grammar definition")]
    Json(#[from] serde_json::Error),

    #[error("unsupported grammar file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
