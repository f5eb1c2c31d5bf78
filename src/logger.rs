use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};
use std::io::Write;

/// Status tag for a log line, in the tool's `[*] Logging in...` style.
/// Errors and warnings get `[!]`, diagnostics name their level.
fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "[!]".red().bold(),
        Level::Warn => "[!]".yellow(),
        Level::Info => "[*]".green(),
        Level::Debug => "[debug]".blue(),
        Level::Trace => "[trace]".purple(),
    }
}

pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter(None, level)
        .parse_default_env()
        .format(|buf, record| {
            let tag = level_tag(record.level());
            if record.level() >= Level::Debug {
                // Diagnostics carry their origin; status lines stay bare.
                writeln!(buf, "{} {}: {}", tag, record.target(), record.args())
            } else {
                writeln!(buf, "{} {}", tag, record.args())
            }
        })
        .init();
}
