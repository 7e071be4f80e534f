use colored::{Color, Colorize};
use log::{Level, LevelFilter};

/// Routes engine logs to stderr, one colored `level:` prefix per line.
pub fn init(level: LevelFilter) {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let color = match record.level() {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Blue,
                Level::Debug => Color::Magenta,
                Level::Trace => Color::Green,
            };
            let prefix = format!("{}:", record.level().as_str().to_lowercase());
            out.finish(format_args!("{} {}", prefix.as_str().color(color), message))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Err(err) = dispatch.apply() {
        eprintln!("warning: logging disabled: {err}");
    }
}
