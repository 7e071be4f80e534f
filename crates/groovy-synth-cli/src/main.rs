mod cli;
mod commands;
mod logger;

use cli::{SynthParams, build_cli, log_level};

fn main() {
    let matches = build_cli().get_matches();

    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };

    if let Some(level) = log_level(m) {
        logger::init(level);
    }

    match SynthParams::from_matches(name, m) {
        Some(params) => commands::synth::run(params.into()),
        None => unreachable!("clap should have caught this"),
    }
}
