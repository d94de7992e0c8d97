// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_snapshot;
use crate::config::Config;
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = load_snapshot(sub)?;
    let t = &snapshot.totals;
    if !maybe_print_json(json_flag, jsonl_flag, t)? {
        let ccy = &cfg.currency;
        let data = vec![
            vec!["Disponible".to_string(), format_currency(t.available, ccy)],
            vec!["Ingresos".to_string(), format_currency(t.income, ccy)],
            vec!["Gastos".to_string(), format_currency(t.expenses, ccy)],
            vec!["Ahorros".to_string(), format_currency(t.savings, ccy)],
        ];
        println!("{}", pretty_table(&["Total", "Amount"], data));
    }
    Ok(())
}
