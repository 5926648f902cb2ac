//! Awaken CLI - mounts one profile session and drives it from the terminal.
//!
//! # Architecture
//!
//! ```text
//! main() -> load config -> load profile -> Runtime::run()  (tokio task)
//!              stdin lines --Command--> runtime --SessionEvent--> stdout
//! ```
//!
//! The runtime owns the session; this binary only parses input and prints
//! events. Logs go to a file so they never interleave with the output.

mod input;
mod output;
mod profile;

use anyhow::{Result, bail};
use std::{
    env,
    fs::{self, File, OpenOptions},
    path::PathBuf,
    process,
    sync::Mutex,
};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tokio::signal::ctrl_c;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use awaken_engine::runtime::Runtime;
use awaken_engine::{
    AwakenConfig, EndorsementClient, HttpEndorsementClient, LocalEndorsementClient, Profile,
    SessionSettings, TracingBackend,
};

use crate::input::{HELP, Input, parse_line};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than mixing logs into the event stream.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.awaken/logs/awaken.log
    if let Some(config_path) = AwakenConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("awaken.log"));
    }

    // Fallback: ./.awaken/logs/awaken.log
    candidates.push(PathBuf::from(".awaken").join("logs").join("awaken.log"));

    candidates
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => match args.next() {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("--config needs a path"),
                },
                "-h" | "--help" => {
                    println!("usage: awaken [--config PATH]\n{HELP}");
                    process::exit(0);
                }
                other => bail!("unknown argument `{other}`; usage: awaken [--config PATH]"),
            }
        }
        Ok(parsed)
    }
}

/// Load configuration, falling back to defaults on any problem.
fn load_config(explicit: Option<&PathBuf>) -> AwakenConfig {
    let loaded = match explicit {
        Some(path) => AwakenConfig::load_from(path),
        None => AwakenConfig::load(),
    };
    match loaded {
        Ok(Some(config)) => config,
        Ok(None) => AwakenConfig::default(),
        Err(e) => {
            tracing::warn!(path = %e.path().display(), "Using default config: {e}");
            eprintln!("warning: {e}; using defaults");
            AwakenConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(env::args().skip(1))?;
    let config = load_config(args.config.as_ref());
    let settings = SessionSettings::from(&config);
    let profile = profile::load(&config).await;

    match config.remote_base_url() {
        Some(base_url) => match HttpEndorsementClient::new(base_url, config.remote_timeout()) {
            Ok(client) => drive(settings, profile, client).await,
            Err(e) => {
                tracing::warn!("Endorsements stay local: {e}");
                drive(settings, profile, LocalEndorsementClient).await
            }
        },
        None => drive(settings, profile, LocalEndorsementClient).await,
    }
}

async fn drive<C: EndorsementClient>(
    settings: SessionSettings,
    profile: Profile,
    client: C,
) -> Result<()> {
    let runtime = Runtime::start(settings, profile, TracingBackend::default(), client)?;
    let (commands, command_rx) = mpsc::channel(32);
    let (event_tx, mut events) = mpsc::unbounded_channel();

    let driver = tokio::spawn(runtime.run(command_rx, event_tx));
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{}", output::render(&event));
        }
    });

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Command(command))) => {
                        if commands.send(command).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
            _ = ctrl_c() => break,
        }
    }

    drop(commands);
    let audio = driver.await?;
    printer.await?;
    tracing::info!(active_loops = audio.active_loops(), "session closed");
    Ok(())
}
