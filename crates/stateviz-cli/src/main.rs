//! `stateviz` command-line viewer.
//!
//! Loads a JSON-lines mutation log (or the built-in example), then lists
//! container names, projects containers at one entry, or walks the whole log
//! printing projections at every step.
//!
//! # Pipeline
//!
//! ```text
//! file --> ingest (lines -> RawEntry) --> EventLog::build --> Session --> render
//! ```
//!
//! Diagnostics go to stderr through `tracing`; results go to stdout.

mod cli;
mod error;
mod ingest;
mod render;

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use stateviz_core::config::StateVizConfig;
use stateviz_core::{ContainerView, LogSource, Session};
use stateviz_log::Entry;
use stateviz_types::EntryId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_PATH: &str = "stateviz.yaml";

/// JSON output of `show --json`.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    entry: EntryId,
    loc: &'a str,
    containers: &'a [ContainerView],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config comes first so it can set the log level
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    let mut session = open_session(cli.log.as_deref(), &config)?;

    match cli.command {
        Command::Names => {
            for name in session.log().container_names() {
                println!("{name}");
            }
        }
        Command::Show {
            at,
            containers,
            json,
        } => show(&mut session, &at, &containers, json)?,
        Command::Walk { containers } => walk(&mut session, &containers)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StateVizConfig, CliError> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !fallback.exists() {
                return Ok(StateVizConfig::parse("")?);
            }
            fallback
        }
    };
    Ok(StateVizConfig::from_file(&path)?)
}

fn init_tracing(config: &StateVizConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn open_session(log: Option<&Path>, config: &StateVizConfig) -> Result<Session, CliError> {
    let Some(path) = log else {
        info!("no log given, using the example log");
        return Ok(Session::new(config));
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;
    let log = ingest::load_log(&text)?;
    info!(
        path = %path.display(),
        entries = log.len(),
        mutations = log.mutation_count(),
        "log loaded"
    );
    Ok(Session::with_log(log, LogSource::UserProvided, config))
}

/// Resolve `--at` as an entry index, falling back to a location label.
fn resolve_entry(session: &Session, at: &str) -> Result<EntryId, CliError> {
    let log = session.log();
    let by_index = at.parse::<usize>().ok().and_then(|index| log.get(index));
    by_index
        .or_else(|| log.find_loc(at))
        .map(Entry::id)
        .ok_or_else(|| CliError::UnknownLocation {
            at: at.to_owned(),
            len: log.len(),
        })
}

/// Views for `--container` names, or the session selection when none given.
fn container_views(
    session: &mut Session,
    containers: &[String],
) -> Result<Vec<ContainerView>, CliError> {
    if containers.is_empty() {
        return Ok(session.views()?);
    }
    let known = session.log().container_names();
    for name in containers.iter().filter(|n| !known.contains(&n.as_str())) {
        warn!(container = %name, "container is never mutated in this log");
    }
    Ok(session.views_of(containers.iter().map(String::as_str))?)
}

fn show(session: &mut Session, at: &str, containers: &[String], json: bool) -> Result<(), CliError> {
    let entry = resolve_entry(session, at)?;
    session.select(entry)?;
    let views = container_views(session, containers)?;
    let loc = session.log().entry(entry).map_or("", Entry::loc);

    if json {
        let snapshot = Snapshot {
            entry,
            loc,
            containers: &views,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("@ {loc}");
        println!("{}", render::render_views(session.log(), &views, entry));
    }
    Ok(())
}

fn walk(session: &mut Session, containers: &[String]) -> Result<(), CliError> {
    let Some(first) = session.log().first().map(Entry::id) else {
        info!("log is empty, nothing to walk");
        return Ok(());
    };
    session.select(first)?;

    let mut cursor = first;
    loop {
        let views = container_views(session, containers)?;
        let loc = session.log().entry(cursor).map_or("", Entry::loc);
        println!("@ {loc}");
        println!("{}", render::render_views(session.log(), &views, cursor));

        match session.step_forward() {
            Some(next) if next != cursor => {
                println!();
                cursor = next;
            }
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use stateviz_types::ContainerValue;

    use super::*;

    fn example_session() -> Session {
        Session::new(&StateVizConfig::default())
    }

    fn position(session: &Session, at: &str) -> Option<usize> {
        resolve_entry(session, at)
            .ok()
            .and_then(|id| session.log().position(id))
    }

    #[test]
    fn at_resolves_index_first() {
        let session = example_session();
        assert_eq!(position(&session, "0"), Some(0));
        assert_eq!(position(&session, "3"), Some(3));
    }

    #[test]
    fn at_falls_back_to_location_label() {
        let session = example_session();
        let label = session.log().get(2).map(|e| e.loc().to_owned()).unwrap_or_default();
        assert_eq!(position(&session, &label), Some(2));
    }

    #[test]
    fn at_out_of_range_or_unknown_is_rejected() {
        let session = example_session();
        for at in ["4", "99", "nowhere.py:1"] {
            assert!(matches!(
                resolve_entry(&session, at),
                Err(CliError::UnknownLocation { len: 4, .. })
            ));
        }
    }

    #[test]
    fn unknown_container_is_shown_unset() {
        let mut session = example_session();
        let views = container_views(&mut session, &["typo".to_owned()]).unwrap_or_default();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views.first().map(|v| v.projection.value.clone()),
            Some(ContainerValue::Unset)
        );
    }

    #[test]
    fn no_containers_means_session_selection() {
        let mut session = example_session();
        let views = container_views(&mut session, &[]).unwrap_or_default();
        let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["divisible", "replacements"]);
    }
}
