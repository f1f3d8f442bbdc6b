//! # lexgram
//!
//! Declarative lexical grammars, resolved in two phases.
//!
//! Grammars are written as named states holding ordered rules. A rule pairs a
//! regex pattern with one or more token categories, and refers to its state and
//! categories by name, so fragments can be authored independently and combined
//! later. Those name-based declarations ([`lexgram::descriptor`]) are bound to a
//! concrete grammar by the resolver ([`lexgram::resolver`]), which compiles and
//! validates everything before touching the grammar.
//!
//! Scanning input against a resolved grammar, and the category taxonomy itself,
//! belong to the caller.

pub mod lexgram;
