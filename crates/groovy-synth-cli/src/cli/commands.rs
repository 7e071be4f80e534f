//! Command builders for the CLI.
//!
//! One subcommand per construction request. Output flags (`--trivia`,
//! `--spans`, `--color`, `-v`) are global and work after any subcommand.

use clap::{Arg, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("groovy-synth")
        .about("Build Groovy syntax fragments and print their syntax trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .arg(color_arg())
        .arg(trivia_arg())
        .arg(spans_arg())
        .subcommand(declare_command())
        .subcommand(field_command())
        .subcommand(param_command())
        .subcommand(type_ref_command())
        .subcommand(type_command())
        .subcommand(call_command())
        .subcommand(closure_command())
        .subcommand(import_command())
        .subcommand(package_command())
        .subcommand(block_command())
        .subcommand(args_command())
        .subcommand(string_command())
        .subcommand(modifier_command())
        .subcommand(newline_command())
        .subcommand(space_command())
}

pub fn declare_command() -> Command {
    Command::new("declare")
        .about("Local variable declaration")
        .after_help(
            r#"EXAMPLES:
  groovy-synth declare x y                      # def x, y
  groovy-synth declare -m final -t String s     # final String s
  groovy-synth declare -t java.lang.Integer i   # int i
  groovy-synth declare x -i 'foo a, b'          # def x = foo(a, b)"#,
        )
        .arg(names_arg())
        .arg(modifier_arg())
        .arg(type_arg())
        .arg(init_arg())
}

pub fn field_command() -> Command {
    Command::new("field")
        .about("Field declaration inside a class body")
        .arg(names_arg())
        .arg(modifier_arg())
        .arg(type_arg())
        .arg(init_arg())
}

pub fn param_command() -> Command {
    Command::new("param")
        .about("Method parameter")
        .arg(name_arg("Parameter name"))
        .arg(type_arg())
}

pub fn type_ref_command() -> Command {
    Command::new("type-ref")
        .about("Code reference to a type")
        .arg(qualified_name_arg())
}

pub fn type_command() -> Command {
    Command::new("type")
        .about("Type element (class, primitive or array)")
        .arg(text_arg("Type text, e.g. `java.util.List<String>` or `int[]`"))
}

pub fn call_command() -> Command {
    Command::new("call")
        .about("Method call expression")
        .after_help(
            r#"EXAMPLES:
  groovy-synth call println 'x + 1'    # println(x + 1)
  groovy-synth call list.clear         # list.clear()"#,
        )
        .arg(text_arg("Callee text"))
        .arg(items_arg("ARG", "Argument expressions"))
}

pub fn closure_command() -> Command {
    Command::new("closure")
        .about("Closure from its source text")
        .arg(text_arg("Closure text, e.g. `{ it * 2 }`"))
}

pub fn import_command() -> Command {
    Command::new("import")
        .about("Import statement")
        .arg(qualified_name_arg())
        .arg(static_arg())
        .arg(on_demand_arg())
        .arg(alias_arg())
}

pub fn package_command() -> Command {
    Command::new("package")
        .about("Package reference")
        .arg(qualified_name_arg())
}

pub fn block_command() -> Command {
    Command::new("block")
        .about("Block statement holding the given statements")
        .arg(items_arg("STMT", "Statements, one per line"))
}

pub fn args_command() -> Command {
    Command::new("args")
        .about("Argument list")
        .arg(items_arg("EXPR", "Argument expressions"))
}

pub fn string_command() -> Command {
    Command::new("string")
        .about("String literal whose value is exactly CONTENT")
        .arg(Arg::new("content").value_name("CONTENT").required(true))
}

pub fn modifier_command() -> Command {
    Command::new("modifier")
        .about("Modifier keyword token")
        .arg(name_arg("Modifier keyword"))
}

pub fn newline_command() -> Command {
    Command::new("newline")
        .about("Line terminator token")
        .arg(count_arg())
}

pub fn space_command() -> Command {
    Command::new("space").about("Single whitespace token")
}
