//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be reused
//! by every command that needs it.

use clap::{Arg, ArgAction, value_parser};

/// Declared names (positional, one or more).
pub fn names_arg() -> Arg {
    Arg::new("names")
        .value_name("NAME")
        .num_args(1..)
        .required(true)
        .help("Declared variable names")
}

/// Single name (positional).
pub fn name_arg(help: &'static str) -> Arg {
    Arg::new("name").value_name("NAME").required(true).help(help)
}

/// Qualified name (positional).
pub fn qualified_name_arg() -> Arg {
    Arg::new("qualified_name")
        .value_name("QNAME")
        .required(true)
        .help("Dotted qualified name")
}

/// Source text (positional).
pub fn text_arg(help: &'static str) -> Arg {
    Arg::new("text").value_name("TEXT").required(true).help(help)
}

/// Modifier keywords (-m/--modifier, repeatable).
pub fn modifier_arg() -> Arg {
    Arg::new("modifiers")
        .short('m')
        .long("modifier")
        .value_name("KEYWORD")
        .action(ArgAction::Append)
        .help("Modifier keyword (repeatable)")
}

/// Type text (-t/--type).
pub fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .help("Type text (omit for an untyped declaration)")
}

/// Initializer text (-i/--init).
pub fn init_arg() -> Arg {
    Arg::new("init")
        .short('i')
        .long("init")
        .value_name("EXPR")
        .help("Initializer expression or command call")
}

/// Trailing expressions or statements (positional, zero or more).
pub fn items_arg(value_name: &'static str, help: &'static str) -> Arg {
    Arg::new("items")
        .value_name(value_name)
        .num_args(0..)
        .help(help)
}

/// Static import (--static).
pub fn static_arg() -> Arg {
    Arg::new("static")
        .long("static")
        .action(ArgAction::SetTrue)
        .help("Static import")
}

/// On-demand import (--on-demand).
pub fn on_demand_arg() -> Arg {
    Arg::new("on_demand")
        .long("on-demand")
        .action(ArgAction::SetTrue)
        .help("Import every member (`.*`)")
}

/// Import alias (--alias).
pub fn alias_arg() -> Arg {
    Arg::new("alias")
        .long("alias")
        .value_name("NAME")
        .help("Import alias")
}

/// Newline count (-n/--count).
pub fn count_arg() -> Arg {
    Arg::new("count")
        .short('n')
        .long("count")
        .value_name("N")
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Number of line breaks")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .global(true)
        .help("Colorize diagnostics")
}

/// Show trivia tokens (--trivia).
pub fn trivia_arg() -> Arg {
    Arg::new("trivia")
        .long("trivia")
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Include trivia tokens (whitespace, comments)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Show source positions")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log scaffolds (-v) and locator steps (-vv) to stderr")
}
