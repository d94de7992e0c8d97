// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_snapshot;
use crate::budget::BudgetCard;
use crate::config::Config;
use crate::dashboard::{BudgetFilter, recent_categories, search_cards, top_recent_cards};
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let cards = query_cards(cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &cards)? {
        let rows: Vec<Vec<String>> = cards.iter().map(|c| card_row(c, &cfg.currency)).collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Status", "Spent", "Budget", "Progress", "Remaining", "Icon"],
                rows,
            )
        );
    }
    Ok(())
}

/// Cards after applying `--filter`, `--search` and `--top`.
pub fn query_cards(cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<BudgetCard>> {
    let snapshot = load_snapshot(sub)?;
    let cards = cfg
        .aggregator()
        .build(&snapshot.budget_limits, &snapshot.spent_map);
    info!(cards = cards.len(), "budget cards built");

    if sub.get_flag("top") {
        let recent = recent_categories(&snapshot.history, cfg.recent_window, cfg.recent_count);
        return Ok(top_recent_cards(&cards, &recent, cfg.recent_count)
            .into_iter()
            .cloned()
            .collect());
    }

    let filter: BudgetFilter = sub
        .get_one::<String>("filter")
        .map(|s| s.parse::<BudgetFilter>())
        .transpose()?
        .unwrap_or_default();
    let query = sub.get_one::<String>("search").map(|s| s.as_str()).unwrap_or("");
    Ok(search_cards(&cards, filter, query, cfg.match_threshold)
        .into_iter()
        .map(|r| r.item.clone())
        .collect())
}

fn card_row(c: &BudgetCard, ccy: &str) -> Vec<String> {
    let progress = if c.hide_progress {
        String::from("-")
    } else {
        let pct = (c.bar_ratio() * Decimal::ONE_HUNDRED).round();
        format!("{} {}%", bar(c.bar_ratio()), pct)
    };
    vec![
        c.category.clone(),
        c.status.label().to_string(),
        format_currency(c.spent, ccy),
        c.subtitle(ccy),
        progress,
        c.remaining.to_string(),
        c.icon.to_string(),
    ]
}

fn bar(ratio: Decimal) -> String {
    const WIDTH: i64 = 10;
    let filled = (ratio * Decimal::from(WIDTH))
        .round()
        .to_i64()
        .unwrap_or(0)
        .clamp(0, WIDTH);
    let mut s = "█".repeat(filled as usize);
    s.push_str(&"░".repeat((WIDTH - filled) as usize));
    s
}
