use anyhow::{Context, Result};
use birthday_lookup::{load, process::error_log::ErrorLog, session};
use clap::Parser;
use reqwest::blocking::Client;
use std::{io, path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Look up people's birthdays from a CSV published at a URL"
)]
struct Args {
    /// Where to fetch the `id,name,birthday` CSV from (http, https or file).
    url: String,
    /// Append rows with unreadable birthdates here.
    #[arg(long, default_value = "errors.log")]
    error_log: PathBuf,
}

fn main() -> Result<ExitCode> {
    // stdout belongs to the prompt loop, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut error_log = ErrorLog::append(&args.error_log)
        .with_context(|| format!("opening error log {}", args.error_log.display()))?;

    let client = Client::new();
    let Some(table) = load::load_table(&client, &args.url, &mut error_log, io::stdout().lock())?
    else {
        return Ok(ExitCode::FAILURE);
    };
    info!(rejected = error_log.written(), "error log written");

    let stdin = io::stdin();
    session::run(&table, stdin.lock(), io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}
