//! Compiled rules

use crate::lexgram::category::Category;
use crate::lexgram::error::ResolveError;
use crate::lexgram::pattern::CompiledPattern;

/// A state the scanner enters when a transition pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateRef {
    /// Re-enter the state the rule belongs to (`#push`)
    Current,
    Named(String),
}

/// State-stack action declared by a rule.
///
/// Only the declaration lives here; applying it while scanning is the
/// scanner's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Push states in order, so the last one becomes active.
    Push(Vec<StateRef>),
    /// Pop this many states (always at least one).
    Pop(usize),
}

/// A compiled rule: a pattern and the categories it emits, in capture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: CompiledPattern,
    categories: Vec<Category>,
    transition: Option<Transition>,
}

impl Rule {
    /// Fails with [`ResolveError::NoCategories`] if `categories` is empty.
    pub fn new(pattern: CompiledPattern, categories: Vec<Category>) -> Result<Self, ResolveError> {
        if categories.is_empty() {
            return Err(ResolveError::NoCategories {
                pattern: pattern.as_str().to_string(),
            });
        }
        Ok(Self {
            pattern,
            categories,
            transition: None,
        })
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }
}
