//! Grammars and their state store
//!
//! A [`Grammar`] owns its states by name. States must be declared before rules can
//! be attached to them: looking up an undeclared state is an error, never an
//! implicit declaration, so a rule aimed at a misspelled or not-yet-declared state
//! surfaces as [`ResolveError::StateNotFound`].

pub mod rule;
pub mod state;

pub use rule::{Rule, StateRef, Transition};
pub use state::State;

use crate::lexgram::error::ResolveError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    name: String,
    states: HashMap<String, State>,
}

impl Grammar {
    /// Create an empty grammar
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
        }
    }

    /// Create a grammar with the given states already declared
    pub fn with_states<I, S>(name: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grammar = Self::new(name);
        for state in states {
            grammar.declare_state(state);
        }
        grammar
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a state. Returns `false` if it already existed (its rules are kept).
    pub fn declare_state(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.states.contains_key(&name) {
            return false;
        }
        self.states.insert(name.clone(), State::new(name));
        true
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn state(&self, name: &str) -> Result<&State, ResolveError> {
        self.states
            .get(name)
            .ok_or_else(|| ResolveError::StateNotFound {
                name: name.to_string(),
            })
    }

    pub fn state_mut(&mut self, name: &str) -> Result<&mut State, ResolveError> {
        self.states
            .get_mut(name)
            .ok_or_else(|| ResolveError::StateNotFound {
                name: name.to_string(),
            })
    }

    /// Declared state names (sorted)
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of rules across all states
    pub fn rule_count(&self) -> usize {
        self.states.values().map(State::len).sum()
    }
}
