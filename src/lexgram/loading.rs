//! Grammar definition files
//!
//! A definition lists the states a grammar declares and its rules, in order:
//!
//! ```yaml
//! name: ini
//! states: [root, value]
//! rules:
//!   - state: root
//!     pattern: '^\[[^\]]*\]'
//!     categories: [keyword]
//!   - state: root
//!     pattern: '='
//!     categories: [operator]
//!     next: [value]
//!   - state: value
//!     pattern: '$'
//!     categories: [text]
//!     next: ['#pop']
//! ```
//!
//! Rules are checked for shape while the file is read (non-empty pattern,
//! at least one category, well-formed `next`); names are only bound later, when
//! the resulting [`GrammarBuilder`] resolves them.

use crate::lexgram::builder::GrammarBuilder;
use crate::lexgram::descriptor::Descriptor;
use crate::lexgram::error::LoadError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarDefinition {
    pub name: String,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub rules: Vec<Descriptor>,
}

impl GrammarDefinition {
    pub fn from_yaml(source: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read a definition, picking the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&read()?),
            Some("json") => Self::from_json(&read()?),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Declare every listed state, then queue every rule in file order.
    pub fn into_builder(self) -> GrammarBuilder {
        let mut builder = GrammarBuilder::new(self.name);
        for state in self.states {
            builder.grammar_mut().declare_state(state);
        }
        for rule in self.rules {
            builder.push(rule);
        }
        builder
    }
}
