//! Plain token rules: a pattern tagged with one or more categories

use crate::lexgram::descriptor::RuleDescriptor;
use crate::lexgram::error::DescriptorError;
use std::fmt;

/// Unresolved declaration of a rule in a named state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRuleDescriptor {
    state_name: String,
    pattern: String,
    category_names: Vec<String>,
}

impl TokenRuleDescriptor {
    /// Rejects an empty state name, an empty pattern and an empty category list.
    pub fn new<I, S>(
        state_name: impl Into<String>,
        pattern: impl Into<String>,
        category_names: I,
    ) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state_name = state_name.into();
        let pattern = pattern.into();
        let category_names: Vec<String> = category_names.into_iter().map(Into::into).collect();

        if state_name.is_empty() {
            return Err(DescriptorError::EmptyStateName);
        }
        if pattern.is_empty() {
            return Err(DescriptorError::EmptyPattern);
        }
        if category_names.is_empty() {
            return Err(DescriptorError::NoCategories { pattern });
        }

        Ok(Self {
            state_name,
            pattern,
            category_names,
        })
    }
}

impl RuleDescriptor for TokenRuleDescriptor {
    fn state_name(&self) -> &str {
        &self.state_name
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn category_names(&self) -> &[String] {
        &self.category_names
    }
}

impl fmt::Display for TokenRuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: /{}/ -> [{}]",
            self.state_name,
            self.pattern,
            self.category_names.join(", ")
        )
    }
}
