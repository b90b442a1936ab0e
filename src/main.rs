// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, bail, Context, Result};
use journal_watch::config::{load_config, WatcherConfig};
use journal_watch::events::{Event, EventFilter, EventTypeRegistry, MessageResolver};
use journal_watch::source::{ActiveJournal, JournalDirectory, JournalFile, JournalReader};
use journal_watch::watcher::{callback, JournalWatcher};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    replay: bool,
    path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a file"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--replay" => parsed.replay = true,
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            path => {
                if parsed.path.is_some() {
                    bail!("only one journal path may be given");
                }
                parsed.path = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

/// The newest journal in the configured (or default) directory.
fn active_journal(config: &WatcherConfig) -> Result<PathBuf> {
    let dir = config
        .journal_directory()
        .ok_or_else(|| anyhow!("no journal path given and no home directory to search"))?;
    JournalDirectory::new(&dir)
        .current()
        .with_context(|| format!("cannot list journals in {}", dir.display()))?
        .ok_or_else(|| anyhow!("no journal found in {}", dir.display()))
}

fn print_event(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "journal-watch".to_string());
    let args = match parse_args(argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} [--config FILE] [--replay] [PATH]", program);
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => WatcherConfig::default(),
    };
    let path = match args.path {
        Some(path) => path,
        None => active_journal(&config)?,
    };

    let reader = JournalReader::new(
        JournalFile::new(&path),
        config.version_resolver()?,
        MessageResolver::new(Arc::new(EventTypeRegistry::builtin())),
    )
    .with_keep_raw(config.keep_raw);
    let watcher = JournalWatcher::new(reader, config.watch_options());
    watcher.add_callback(EventFilter::all(), callback(print_event), None)?;

    if args.replay {
        watcher.read_all_sync()?;
        return Ok(());
    }

    watcher.start()?;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
            _ = ticker.tick() => {
                if !watcher.is_open() {
                    break;
                }
            }
        }
    }
    watcher.stop();

    match watcher.take_failure() {
        Some(e) => Err(e).with_context(|| format!("stopped watching {}", path.display())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());
        assert_eq!(
            args(&["--config", "watch.yaml", "--replay", "Journal.1.log"]).unwrap(),
            Args {
                config: Some(PathBuf::from("watch.yaml")),
                replay: true,
                path: Some(PathBuf::from("Journal.1.log")),
            }
        );
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.log", "b.log"]).is_err());
    }
}
