//! Rule descriptors
//!
//! A descriptor is an unresolved, name-based declaration of a rule. It refers to
//! its target state and its categories by name only, so grammars can be assembled
//! from fragments written independently of each other. Binding happens later, in
//! [`Resolver::resolve`], against a specific grammar.
//!
//! New descriptor kinds implement [`RuleDescriptor`] and customise
//! [`RuleDescriptor::create_rule`]; the validate-then-attach sequence itself is
//! owned by the resolver and cannot be changed by a descriptor.

pub mod token_rule;
pub mod transition_rule;

pub use token_rule::TokenRuleDescriptor;
pub use transition_rule::{parse_transition, TransitionRuleDescriptor};

use crate::lexgram::category::Category;
use crate::lexgram::error::{DescriptorError, ResolveError};
use crate::lexgram::grammar::{Grammar, Rule};
use crate::lexgram::pattern::CompiledPattern;
use crate::lexgram::resolver::Resolver;
use serde::Deserialize;
use std::fmt;

/// Name-based view of a rule declaration.
pub trait RuleDescriptor: fmt::Display {
    /// State the compiled rule is appended to
    fn state_name(&self) -> &str;

    /// Raw pattern text
    fn pattern(&self) -> &str;

    /// Category names, in capture order
    fn category_names(&self) -> &[String];

    /// Build the rule to attach from already-validated parts.
    ///
    /// Called after the pattern compiled and every category resolved, and before
    /// anything is appended. Returning an error here still leaves the grammar
    /// untouched.
    fn create_rule(
        &self,
        pattern: CompiledPattern,
        categories: Vec<Category>,
        _grammar: &Grammar,
    ) -> Result<Rule, ResolveError> {
        Rule::new(pattern, categories)
    }
}

/// Any supported descriptor kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRule")]
pub enum Descriptor {
    Token(TokenRuleDescriptor),
    Transition(TransitionRuleDescriptor),
}

impl Descriptor {
    /// Resolve this descriptor against `grammar`, see [`Resolver::resolve`].
    pub fn resolve(&self, grammar: &mut Grammar, resolver: &Resolver<'_>) -> Result<(), ResolveError> {
        match self {
            Descriptor::Token(desc) => resolver.resolve(desc, grammar),
            Descriptor::Transition(desc) => resolver.resolve(desc, grammar),
        }
    }

    pub fn as_rule_descriptor(&self) -> &dyn RuleDescriptor {
        match self {
            Descriptor::Token(desc) => desc,
            Descriptor::Transition(desc) => desc,
        }
    }

    pub fn state_name(&self) -> &str {
        self.as_rule_descriptor().state_name()
    }
}

impl From<TokenRuleDescriptor> for Descriptor {
    fn from(desc: TokenRuleDescriptor) -> Self {
        Descriptor::Token(desc)
    }
}

impl From<TransitionRuleDescriptor> for Descriptor {
    fn from(desc: TransitionRuleDescriptor) -> Self {
        Descriptor::Transition(desc)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Token(desc) => fmt::Display::fmt(desc, f),
            Descriptor::Transition(desc) => fmt::Display::fmt(desc, f),
        }
    }
}

/// Wire shape of a rule in grammar definition files.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    state: String,
    pattern: String,
    categories: Vec<String>,
    #[serde(default)]
    next: Option<Vec<String>>,
}

impl TryFrom<RawRule> for Descriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let rule = TokenRuleDescriptor::new(raw.state, raw.pattern, raw.categories)?;
        match raw.next {
            None => Ok(Descriptor::Token(rule)),
            Some(next) => Ok(Descriptor::Transition(TransitionRuleDescriptor::from_entries(
                rule, &next,
            )?)),
        }
    }
}
