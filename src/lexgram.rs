//! Main module for lexgram library functionality
//!
//! Leaves first: [`category`] and [`pattern`] are the lookup and compile
//! primitives, [`grammar`] is the state store, [`descriptor`] holds unresolved
//! rule declarations, [`resolver`] binds one descriptor to one grammar, and
//! [`builder`] drives a whole set of descriptors.

pub mod builder;
pub mod category;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod grammar;
pub mod loading;
pub mod pattern;
pub mod resolver;

pub use builder::{FailurePolicy, GrammarBuilder, ResolutionReport};
pub use category::{Category, CategoryRegistry, CategoryTable};
pub use descriptor::{Descriptor, RuleDescriptor, TokenRuleDescriptor, TransitionRuleDescriptor};
pub use error::{BuildError, DescriptorError, LoadError, ResolveError};
pub use grammar::{Grammar, Rule, State, Transition};
pub use resolver::Resolver;
