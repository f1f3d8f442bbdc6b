//! Token rules that also declare a state-stack transition
//!
//! The transition is written as a list of "next state" entries:
//!
//! ```text
//! ["string"]          push `string`
//! ["#push"]           push the rule's own state again
//! ["#pop"]            pop one state
//! ["#pop", "#pop"]    pop two states
//! ["#pop:3"]          pop three states
//! ```
//!
//! Pops and pushes cannot be mixed in one rule.

use crate::lexgram::category::Category;
use crate::lexgram::descriptor::token_rule::TokenRuleDescriptor;
use crate::lexgram::descriptor::RuleDescriptor;
use crate::lexgram::error::{DescriptorError, ResolveError};
use crate::lexgram::grammar::{Grammar, Rule, StateRef, Transition};
use crate::lexgram::pattern::CompiledPattern;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static POP_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#pop(?::(?P<count>[0-9]+))?$").unwrap());

const PUSH_DIRECTIVE: &str = "#push";

/// Parse a list of next-state entries into a [`Transition`].
pub fn parse_transition<S: AsRef<str>>(entries: &[S]) -> Result<Transition, DescriptorError> {
    if entries.is_empty() {
        return Err(DescriptorError::InvalidTransition(
            "no next states given".to_string(),
        ));
    }

    let mut pops = 0usize;
    let mut pushes = Vec::new();

    for entry in entries {
        let entry = entry.as_ref();
        if let Some(caps) = POP_DIRECTIVE.captures(entry) {
            let count = match caps.name("count") {
                Some(count) => count.as_str().parse::<usize>().map_err(|_| {
                    DescriptorError::InvalidTransition(format!("bad pop count in `{entry}`"))
                })?,
                None => 1,
            };
            if count == 0 {
                return Err(DescriptorError::InvalidTransition(format!(
                    "`{entry}` pops nothing"
                )));
            }
            pops = pops.checked_add(count).ok_or_else(|| {
                DescriptorError::InvalidTransition(format!("pop count overflows at `{entry}`"))
            })?;
        } else if entry == PUSH_DIRECTIVE {
            pushes.push(StateRef::Current);
        } else if entry.is_empty() || entry.starts_with('#') {
            return Err(DescriptorError::InvalidTransition(format!(
                "unknown directive `{entry}`"
            )));
        } else {
            pushes.push(StateRef::Named(entry.to_string()));
        }
    }

    match (pops, pushes.is_empty()) {
        (0, _) => Ok(Transition::Push(pushes)),
        (n, true) => Ok(Transition::Pop(n)),
        _ => Err(DescriptorError::InvalidTransition(
            "cannot mix pops and pushes".to_string(),
        )),
    }
}

/// A token rule that moves the scanner to other states when it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRuleDescriptor {
    rule: TokenRuleDescriptor,
    transition: Transition,
}

impl TransitionRuleDescriptor {
    pub fn new(rule: TokenRuleDescriptor, transition: Transition) -> Self {
        Self { rule, transition }
    }

    /// Build from raw next-state entries, see [`parse_transition`].
    pub fn from_entries<S: AsRef<str>>(
        rule: TokenRuleDescriptor,
        next: &[S],
    ) -> Result<Self, DescriptorError> {
        Ok(Self::new(rule, parse_transition(next)?))
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }
}

impl RuleDescriptor for TransitionRuleDescriptor {
    fn state_name(&self) -> &str {
        self.rule.state_name()
    }

    fn pattern(&self) -> &str {
        self.rule.pattern()
    }

    fn category_names(&self) -> &[String] {
        self.rule.category_names()
    }

    fn create_rule(
        &self,
        pattern: CompiledPattern,
        categories: Vec<Category>,
        grammar: &Grammar,
    ) -> Result<Rule, ResolveError> {
        if let Transition::Push(targets) = &self.transition {
            for target in targets {
                if let StateRef::Named(name) = target {
                    grammar.state(name)?;
                }
            }
        }
        Ok(Rule::new(pattern, categories)?.with_transition(self.transition.clone()))
    }
}

impl fmt::Display for TransitionRuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => ", self.rule)?;
        match &self.transition {
            Transition::Pop(n) => write!(f, "#pop:{n}"),
            Transition::Push(targets) => {
                let names: Vec<&str> = targets
                    .iter()
                    .map(|t| match t {
                        StateRef::Current => PUSH_DIRECTIVE,
                        StateRef::Named(name) => name.as_str(),
                    })
                    .collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_push_named() {
        assert_eq!(
            parse_transition(&["string"]),
            Ok(Transition::Push(vec![StateRef::Named("string".to_string())]))
        );
    }

    #[test]
    fn test_parse_push_current() {
        assert_eq!(
            parse_transition(&["#push", "escape"]),
            Ok(Transition::Push(vec![
                StateRef::Current,
                StateRef::Named("escape".to_string())
            ]))
        );
    }

    #[test]
    fn test_parse_pops_accumulate() {
        assert_eq!(parse_transition(&["#pop", "#pop"]), Ok(Transition::Pop(2)));
        assert_eq!(parse_transition(&["#pop:3"]), Ok(Transition::Pop(3)));
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(parse_transition::<&str>(&[]).is_err());
        assert!(parse_transition(&["#pop:0"]).is_err());
        assert!(parse_transition(&["#pop", "root"]).is_err());
        assert!(parse_transition(&["#jump"]).is_err());
        assert!(parse_transition(&[""]).is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_pops() {
        let entries = [format!("#pop:{}", usize::MAX), "#pop".to_string()];
        assert!(matches!(
            parse_transition(&entries),
            Err(DescriptorError::InvalidTransition(msg)) if msg.contains("overflows")
        ));
        assert_eq!(
            parse_transition(&[format!("#pop:{}", usize::MAX)]),
            Ok(Transition::Pop(usize::MAX))
        );
    }

    #[test]
    fn test_display() {
        let rule = TokenRuleDescriptor::new("root", "\"", ["string"]).unwrap();
        let desc = TransitionRuleDescriptor::from_entries(rule, &["string"]).unwrap();
        assert_eq!(desc.to_string(), "root: /\"/ -> [string] => [string]");
    }
}
