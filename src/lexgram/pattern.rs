//! Pattern compilation
//!
//! Turns rule pattern text into an executable matcher. Patterns are always
//! compiled with multi-line semantics, so `^` and `$` anchor at line boundaries
//! when a scanner feeds multi-line input.
//!
//! The dialect includes lookaround and backreferences (`if(?!\w)`, `(a)\1`).
//! Patterns that use neither are handed to the `regex` engine unchanged; the
//! others fall back to backtracking.

use crate::lexgram::error::ResolveError;
use fancy_regex::{Match, Regex, RegexBuilder};
use serde::Deserialize;
use std::fmt;

/// Default cap on the compiled program size of a single pattern.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Options applied when compiling rule patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternOptions {
    pub case_insensitive: bool,
    pub size_limit: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// A compiled rule pattern.
///
/// Two patterns compare equal when they were compiled from the same text with the
/// same options.
#[derive(Clone)]
pub struct CompiledPattern {
    source: String,
    options: PatternOptions,
    regex: Regex,
}

impl CompiledPattern {
    /// The pattern text as written in the rule
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> PatternOptions {
        self.options
    }

    /// Errors only when a backtracking pattern exceeds its backtrack limit.
    pub fn is_match(&self, text: &str) -> Result<bool, fancy_regex::Error> {
        self.regex.is_match(text)
    }

    /// Find the leftmost match starting at byte offset `start`.
    pub fn find_at<'t>(
        &self,
        text: &'t str,
        start: usize,
    ) -> Result<Option<Match<'t>>, fancy_regex::Error> {
        self.regex.find_from_pos(text, start)
    }

    /// Number of explicit capture groups (group 0 excluded)
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len() - 1
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.options == other.options
    }
}

impl Eq for CompiledPattern {}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("options", &self.options)
            .finish()
    }
}

/// Compile `text` with the given options.
///
/// Syntax errors and size-limit violations are both reported as
/// [`ResolveError::PatternSyntax`], carrying the original text.
pub fn compile(text: &str, options: &PatternOptions) -> Result<CompiledPattern, ResolveError> {
    let flags = if options.case_insensitive { "(?mi)" } else { "(?m)" };
    let regex = RegexBuilder::new(&format!("{flags}{text}"))
        .delegate_size_limit(options.size_limit)
        .build()
        .map_err(|e| ResolveError::PatternSyntax {
            pattern: text.to_string(),
            source: Box::new(e),
        })?;

    Ok(CompiledPattern {
        source: text.to_string(),
        options: *options,
        regex,
    })
}
