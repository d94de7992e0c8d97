// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use finanzas::config::Config;
use finanzas::{cli, commands};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let level = matches
        .get_one::<String>("log_level")
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(LevelFilter::WARN);
    init_logger(level);
    debug!("Log level set to {}", level.to_string().to_lowercase());

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::load(matches.get_one::<String>("config").map(Path::new))?;

    match matches.subcommand() {
        Some(("budget", sub)) => commands::budgets::handle(&cfg, sub)?,
        Some(("category", sub)) => commands::categories::handle(&cfg, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&cfg, sub)?,
        Some(("report", sub)) => commands::reports::handle(&cfg, sub)?,
        Some(("import", sub)) => commands::importer::handle(&cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
