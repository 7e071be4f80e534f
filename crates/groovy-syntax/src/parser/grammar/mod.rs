//! Grammar productions for the Groovy subset.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Statements are newline-separated; declarations are told apart from
//! expressions by a bounded lookahead scan (see `declarations`).

mod declarations;
mod expressions;
mod items;
mod statements;
mod types;
