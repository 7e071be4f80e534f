//! Parser for the Groovy subset.
//!
//! # Architecture
//!
//! Produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace and comments are attached as leading trivia of the next node
//! - Checkpoint-based wrapping: binary operators, calls and member access wrap what came before
//! - Newline awareness: a line break ends a statement unless an operator is still open
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree.
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Recovery sets define synchronization points for statements and class members
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

mod core;
mod grammar;
mod invariants;

pub use core::{ParseResult, Parser};
