use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log in to the IIT Delhi proxy gateway and optionally keep the session
/// alive.
#[derive(Parser, Debug)]
#[command(name = "proxylogin", version, about)]
#[command(group = clap::ArgGroup::new("source").required(true).multiple(false))]
pub struct Args {
    /// TOML file with a [proxy] section holding username, password and
    /// category
    #[arg(short, long, group = "source")]
    pub config: Option<PathBuf>,

    /// Prompt for credentials on the terminal instead
    #[arg(short, long, group = "source")]
    pub interactive: bool,

    /// After logging in, keep running and refreshing the session
    #[arg(short, long)]
    pub refresh: bool,

    /// Seconds between keep-alive rounds
    #[arg(long, default_value_t = 60, value_name = "SECS")]
    pub interval: u64,

    /// Foolishly accept TLS certificates signed by unknown certificate
    /// authorities
    #[arg(short, long)]
    pub skip_tls_verify: bool,

    /// Print shell export statements for the category's proxy and exit
    #[arg(long)]
    pub print_envvars: bool,

    /// Log verbosity
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn config_and_interactive_are_mutually_exclusive() {
        let result = Args::try_parse_from(["proxylogin", "-c", "a.toml", "-i"]);
        assert!(result.is_err());
    }

    #[test]
    fn one_credential_source_is_required() {
        assert!(Args::try_parse_from(["proxylogin"]).is_err());
        assert!(Args::try_parse_from(["proxylogin", "-i"]).is_ok());
        assert!(Args::try_parse_from(["proxylogin", "-c", "a.toml"]).is_ok());
    }

    #[test]
    fn interval_defaults_to_a_minute() {
        let args = Args::try_parse_from(["proxylogin", "-i", "-r"]).unwrap();
        assert_eq!(args.interval, 60);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
