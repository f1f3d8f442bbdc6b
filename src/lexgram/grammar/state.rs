//! Grammar states

use crate::lexgram::grammar::rule::Rule;

/// A named lexical context holding rules in resolution order.
///
/// Rules are only ever appended; there is no way to remove or reorder them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    rules: Vec<Rule>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn append_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
