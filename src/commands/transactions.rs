// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, required};
use crate::config::Config;
use crate::dashboard::{HistoryFilter, filter_history};
use crate::models::{NewTransaction, TransactionType};
use crate::utils::{format_currency, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(cfg, sub)?,
        Some(("new", sub)) => {
            let tx = build_new(sub)?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        _ => {}
    }
    Ok(())
}

fn list(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.month.clone(),
                    r.kind.label().to_string(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.icon.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Month", "Type", "Category", "Amount", "Description", "Icon"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct HistoryRow {
    pub date: String,
    pub month: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub icon: String,
}

pub fn query_rows(cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<HistoryRow>> {
    let snapshot = load_snapshot(sub)?;
    let filter: HistoryFilter = match sub.get_one::<String>("type") {
        Some(t) => t.parse()?,
        None => HistoryFilter::All,
    };
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(cfg.history_cap);
    let classifier = cfg.classifier();

    Ok(filter_history(&snapshot.history, filter)
        .into_iter()
        .take(limit)
        .map(|t| HistoryRow {
            date: t.date.clone(),
            month: t.display_month(),
            kind: t.kind,
            category: t.category.trim().to_string(),
            amount: format_currency(t.amount, &cfg.currency),
            description: t.description.clone(),
            icon: classifier.classify_transaction(t.kind, &t.category).to_string(),
        })
        .collect())
}

/// Payload for the sheet bridge, with the month filled in from the date.
pub fn build_new(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let kind: TransactionType = required(sub, "type")?.parse()?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    if amount.is_sign_negative() {
        bail!("Amount must not be negative, got {}", amount);
    }
    let category = required(sub, "category")?;
    if category.trim().is_empty() {
        bail!("Category must not be empty");
    }
    let description = sub.get_one::<String>("description").map(|s| s.as_str()).unwrap_or("");
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut tx = NewTransaction::new(kind, amount, category, description, date);
    tx.month = sub
        .get_one::<String>("month")
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    Ok(tx.with_derived_month())
}
