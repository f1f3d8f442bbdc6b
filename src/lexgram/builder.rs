//! Grammar assembly from a set of descriptors
//!
//! [`GrammarBuilder`] drives resolution of queued descriptors against one grammar,
//! in queue order. Each queued entry carries its own resolution status:
//!
//! - An entry goes from unresolved to resolved exactly once. Running resolution
//!   again skips resolved entries, so a rule is never attached twice.
//! - A failed entry stays unresolved and can be retried after the grammar has been
//!   fixed up (e.g. a missing state declared). Nothing is retried automatically.
//!
//! What happens on failure is chosen by [`FailurePolicy`].

use crate::lexgram::descriptor::Descriptor;
use crate::lexgram::error::{BuildError, ResolveError};
use crate::lexgram::grammar::Grammar;
use crate::lexgram::resolver::Resolver;
use serde::Deserialize;

/// How the builder reacts to a descriptor that fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Attempt every descriptor and report all failures.
    Collect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Unresolved,
    Resolved,
}

#[derive(Debug, Clone)]
struct Pending {
    descriptor: Descriptor,
    status: ResolutionStatus,
}

/// One descriptor that failed to resolve.
#[derive(Debug)]
pub struct ResolutionFailure {
    /// Position of the descriptor in the builder's queue
    pub index: usize,
    pub descriptor: String,
    pub error: ResolveError,
}

/// Outcome of a resolution pass.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Descriptors attached during this pass
    pub attached: usize,
    /// Descriptors skipped because they were already resolved
    pub skipped: usize,
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assembles a grammar from queued descriptors.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    grammar: Grammar,
    pending: Vec<Pending>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_grammar(Grammar::new(name))
    }

    /// Queue descriptors onto an existing grammar.
    pub fn from_grammar(grammar: Grammar) -> Self {
        Self {
            grammar,
            pending: Vec::new(),
        }
    }

    /// Declare a state
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.grammar.declare_state(name);
        self
    }

    /// Queue a descriptor
    pub fn rule(mut self, descriptor: impl Into<Descriptor>) -> Self {
        self.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: impl Into<Descriptor>) {
        self.pending.push(Pending {
            descriptor: descriptor.into(),
            status: ResolutionStatus::Unresolved,
        });
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Mutable access to the grammar, e.g. to declare a state before retrying.
    pub fn grammar_mut(&mut self) -> &mut Grammar {
        &mut self.grammar
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn status(&self, index: usize) -> Option<ResolutionStatus> {
        self.pending.get(index).map(|p| p.status)
    }

    /// Number of queued descriptors still unresolved
    pub fn unresolved(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| p.status == ResolutionStatus::Unresolved)
            .count()
    }

    /// Resolve every unresolved descriptor, in queue order.
    ///
    /// Under [`FailurePolicy::Abort`] the first failure is returned as an error;
    /// rules attached before it stay attached and later descriptors are left
    /// unresolved. Under [`FailurePolicy::Collect`] this always returns `Ok` and
    /// failures are listed in the report.
    pub fn resolve_pending(
        &mut self,
        resolver: &Resolver<'_>,
        policy: FailurePolicy,
    ) -> Result<ResolutionReport, BuildError> {
        let mut report = ResolutionReport::default();

        for (index, pending) in self.pending.iter_mut().enumerate() {
            if pending.status == ResolutionStatus::Resolved {
                report.skipped += 1;
                continue;
            }

            match pending.descriptor.resolve(&mut self.grammar, resolver) {
                Ok(()) => {
                    pending.status = ResolutionStatus::Resolved;
                    report.attached += 1;
                }
                Err(error) => {
                    let descriptor = pending.descriptor.to_string();
                    match policy {
                        FailurePolicy::Abort => {
                            tracing::debug!(index, %descriptor, %error, "aborting grammar build");
                            return Err(BuildError::Resolution {
                                index,
                                descriptor,
                                source: error,
                            });
                        }
                        FailurePolicy::Collect => {
                            tracing::warn!(index, %descriptor, %error, "rule failed to resolve");
                            report.failures.push(ResolutionFailure {
                                index,
                                descriptor,
                                error,
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!(
            grammar = self.grammar.name(),
            attached = report.attached,
            skipped = report.skipped,
            failed = report.failures.len(),
            "resolution pass finished"
        );
        Ok(report)
    }

    /// Resolve everything and hand back the grammar along with the report.
    pub fn build(
        mut self,
        resolver: &Resolver<'_>,
        policy: FailurePolicy,
    ) -> Result<(Grammar, ResolutionReport), BuildError> {
        let report = self.resolve_pending(resolver, policy)?;
        Ok((self.grammar, report))
    }

    pub fn into_grammar(self) -> Grammar {
        self.grammar
    }
}
