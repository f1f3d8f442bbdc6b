//! Descriptor resolution
//!
//! [`Resolver::resolve`] turns one descriptor into one compiled rule attached to
//! one grammar state. The steps run in a fixed order:
//!
//! 1. the target state must exist ([`ResolveError::StateNotFound`])
//! 2. the pattern must compile ([`ResolveError::PatternSyntax`])
//! 3. every category name must resolve, in order ([`ResolveError::UnknownCategory`])
//! 4. the descriptor builds its rule ([`RuleDescriptor::create_rule`])
//! 5. the rule is appended to the target state
//!
//! Everything before step 5 works on local values only. A failure at any step
//! leaves the grammar exactly as it was.

use crate::lexgram::category::{Category, CategoryRegistry};
use crate::lexgram::config::LexgramConfig;
use crate::lexgram::descriptor::RuleDescriptor;
use crate::lexgram::error::ResolveError;
use crate::lexgram::grammar::Grammar;
use crate::lexgram::pattern::{self, PatternOptions};

/// Resolution context: where categories come from and how patterns compile.
#[derive(Clone, Copy)]
pub struct Resolver<'r> {
    categories: &'r dyn CategoryRegistry,
    options: PatternOptions,
}

impl<'r> Resolver<'r> {
    pub fn new(categories: &'r dyn CategoryRegistry) -> Self {
        Self {
            categories,
            options: PatternOptions::default(),
        }
    }

    pub fn from_config(categories: &'r dyn CategoryRegistry, config: &LexgramConfig) -> Self {
        Self::new(categories).with_options(config.pattern)
    }

    pub fn with_options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Validate `descriptor` and append its compiled rule to its target state.
    pub fn resolve<D>(&self, descriptor: &D, grammar: &mut Grammar) -> Result<(), ResolveError>
    where
        D: RuleDescriptor + ?Sized,
    {
        let state_name = descriptor.state_name();
        grammar.state(state_name)?;

        let compiled = pattern::compile(descriptor.pattern(), &self.options)?;
        let categories = self.resolve_categories(descriptor.category_names())?;

        if categories.len() > 1 && categories.len() != compiled.captures_len() {
            tracing::warn!(
                state = state_name,
                pattern = compiled.as_str(),
                categories = categories.len(),
                groups = compiled.captures_len(),
                "category count does not match capture group count"
            );
        }

        let rule = descriptor.create_rule(compiled, categories, grammar)?;
        grammar.state_mut(state_name)?.append_rule(rule);

        tracing::debug!(
            grammar = grammar.name(),
            state = state_name,
            pattern = descriptor.pattern(),
            "attached rule"
        );
        Ok(())
    }

    fn resolve_categories(&self, names: &[String]) -> Result<Vec<Category>, ResolveError> {
        names
            .iter()
            .map(|name| {
                self.categories
                    .lookup_by_name(name)
                    .ok_or_else(|| ResolveError::UnknownCategory { name: name.clone() })
            })
            .collect()
    }
}
