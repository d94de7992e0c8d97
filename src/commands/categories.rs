// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, required};
use crate::classifier::IconTag;
use crate::config::Config;
use crate::dashboard::category_choices;
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("icon", sub)) => {
            let tag = icon_for(cfg, sub)?;
            println!("{}", tag);
        }
        Some(("search", sub)) => {
            let names = query_search(cfg, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &names)? {
                let rows = names.into_iter().map(|n| vec![n]).collect();
                println!("{}", pretty_table(&["Category"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn icon_for(cfg: &Config, sub: &clap::ArgMatches) -> Result<IconTag> {
    let label = required(sub, "label")?;
    let classifier = cfg.classifier();
    match sub.get_one::<String>("type") {
        Some(t) => {
            let kind: TransactionType = t.parse()?;
            Ok(classifier.classify_transaction(kind, label))
        }
        None => Ok(classifier.classify(label)),
    }
}

/// Picker entries for `--type`, narrowed and ranked by `--query`.
pub fn query_search(cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<String>> {
    let snapshot = load_snapshot(sub)?;
    let kind: TransactionType = required(sub, "type")?.parse()?;
    let query = sub.get_one::<String>("query").map(|s| s.as_str()).unwrap_or("");
    let categories = snapshot
        .categories
        .as_ref()
        .context("Snapshot has no category lists")?;
    Ok(category_choices(categories, kind, query, cfg.match_threshold)
        .into_iter()
        .map(|s| s.to_string())
        .collect())
}
