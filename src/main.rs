//! # IIT Delhi Proxy Login Tool
//!
//! This application logs a user in to the institutional proxy gateway and,
//! if asked, keeps the session alive by refreshing it at a fixed interval.

mod args;

use args::Args;
use clap::Parser;
use log::{error, info};
use proxylogin::{
    envvar_snippet, init_logger, CancellationToken, Config, Credentials, ProxySession,
};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.level.into());

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    // Plain text on stdout so it can be eval'd or redirected; no network,
    // and no password prompt since only the category matters here.
    if args.print_envvars {
        let category = resolve_envvar_category(args.config.as_deref())?;
        print!("{}", envvar_snippet(&category)?);
        return Ok(ExitCode::SUCCESS);
    }

    let credentials: Credentials = match &args.config {
        Some(path) => Config::load(path)?.into(),
        None => Credentials::prompt()?,
    };

    info!(
        "Opening session for {} on the {} gateway",
        credentials.username, credentials.category
    );
    let mut session = ProxySession::connect(
        &credentials.username,
        &credentials.password,
        &credentials.category,
        args.skip_tls_verify,
    )?;

    // Clear any half-open session left behind by a previous run before
    // logging in; its outcome is only interesting in the logs.
    let outcome = session.logout()?;
    info!("Logging out... {}", outcome);

    let outcome = session.login()?;
    info!("Logging in... {}", outcome);

    if args.refresh {
        let cancel = CancellationToken::new();
        let handler_token = cancel.clone();
        ctrlc::set_handler(move || handler_token.cancel())?;

        proxylogin::refresher::run(
            &mut session,
            Duration::from_secs(args.interval),
            &cancel,
            std::thread::sleep,
        );
        info!("Interrupted, exiting");
    }

    Ok(ExitCode::SUCCESS)
}

/// Category for the env-var snippet: from the config file when given,
/// otherwise a single interactive prompt.
fn resolve_envvar_category(config: Option<&std::path::Path>) -> anyhow::Result<String> {
    match config {
        Some(path) => Ok(Config::load(path)?.proxy.category),
        None => Ok(proxylogin::credentials::prompt_category()?),
    }
}
