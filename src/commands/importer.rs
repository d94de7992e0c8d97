// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::config::Config;
use crate::models::SheetSnapshot;
use crate::sheet::{SheetTabs, aggregate, limits_from_rows, read_rows, spent_by_category};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sheets", sub)) => import_sheets(cfg, sub),
        _ => Ok(()),
    }
}

fn import_sheets(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = build_snapshot(cfg, sub)?;
    let text = serde_json::to_string_pretty(&snapshot)?;
    match sub.get_one::<String>("out").map(|s| s.trim()) {
        Some(out) => {
            std::fs::write(out, text).with_context(|| format!("Write snapshot {}", out))?;
            println!("Snapshot written to {}", out);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn rows_from(sub: &clap::ArgMatches, id: &str) -> Result<Vec<Vec<String>>> {
    let path = required(sub, id)?.trim();
    Ok(read_rows(Path::new(path))?)
}

fn optional_rows(sub: &clap::ArgMatches, id: &str) -> Result<Option<Vec<Vec<String>>>> {
    match sub.get_one::<String>(id) {
        Some(p) => Ok(Some(read_rows(Path::new(p.trim()))?)),
        None => Ok(None),
    }
}

/// Snapshot from CSV exports of the register tabs, with spend and limits filled in.
pub fn build_snapshot(cfg: &Config, sub: &clap::ArgMatches) -> Result<SheetSnapshot> {
    let tabs = SheetTabs {
        expenses: rows_from(sub, "expenses")?,
        income: rows_from(sub, "income")?,
        savings: rows_from(sub, "savings")?,
        stats: optional_rows(sub, "stats")?,
    };
    let month = sub.get_one::<String>("month").map(|s| s.as_str());

    let mut snapshot = aggregate(&tabs, cfg.history_cap);
    snapshot.spent_map = spent_by_category(&tabs.expenses, month);
    if let Some(rows) = optional_rows(sub, "limits")? {
        snapshot.budget_limits = limits_from_rows(&rows);
    }
    info!(
        history = snapshot.history.len(),
        categories = snapshot.spent_map.len(),
        "built snapshot from sheet exports"
    );
    Ok(snapshot)
}
