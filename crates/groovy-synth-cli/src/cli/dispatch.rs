//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `SynthParams` mirrors `SynthArgs` but is populated from clap; the
//! subcommand name selects which request the positional args describe.

use clap::ArgMatches;
use log::LevelFilter;

use super::ColorChoice;
use crate::commands::synth::{SynthArgs, SynthInput};

pub struct SynthParams {
    pub input: SynthInput,
    pub trivia: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl SynthParams {
    /// Returns `None` for an unknown subcommand.
    pub fn from_matches(command: &str, m: &ArgMatches) -> Option<Self> {
        let input = match command {
            "declare" | "field" => SynthInput::Declaration {
                field: command == "field",
                modifiers: strings(m, "modifiers"),
                ty: string(m, "type"),
                names: strings(m, "names"),
                init: string(m, "init"),
            },
            "param" => SynthInput::Parameter {
                name: string(m, "name")?,
                ty: string(m, "type"),
            },
            "type-ref" => SynthInput::TypeReference {
                qualified_name: string(m, "qualified_name")?,
            },
            "type" => SynthInput::TypeElement {
                text: string(m, "text")?,
            },
            "call" => SynthInput::Call {
                callee: string(m, "text")?,
                arguments: strings(m, "items"),
            },
            "closure" => SynthInput::Closure {
                text: string(m, "text")?,
            },
            "import" => SynthInput::Import {
                qualified_name: string(m, "qualified_name")?,
                is_static: m.get_flag("static"),
                is_on_demand: m.get_flag("on_demand"),
                alias: string(m, "alias"),
            },
            "package" => SynthInput::Package {
                qualified_name: string(m, "qualified_name")?,
            },
            "block" => SynthInput::Block {
                statements: strings(m, "items"),
            },
            "args" => SynthInput::Arguments {
                expressions: strings(m, "items"),
            },
            "string" => SynthInput::StringLiteral {
                content: string(m, "content")?,
            },
            "modifier" => SynthInput::Modifier {
                name: string(m, "name")?,
            },
            "newline" => SynthInput::Newline {
                count: m.get_one::<usize>("count").copied().unwrap_or(1),
            },
            "space" => SynthInput::Space,
            _ => return None,
        };

        Some(Self {
            input,
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        })
    }
}

impl From<SynthParams> for SynthArgs {
    fn from(p: SynthParams) -> Self {
        Self {
            input: p.input,
            trivia: p.trivia,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

/// `-v` enables debug logging, `-vv` and more enable trace.
pub fn log_level(m: &ArgMatches) -> Option<LevelFilter> {
    match m.get_count("verbose") {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn string(m: &ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
