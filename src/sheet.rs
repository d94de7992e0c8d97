// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns raw spreadsheet rows into a [`SheetSnapshot`].
//!
//! The register tabs ("Registro egresos", "Registro ingresos", "Registro ahorro") use
//! columns A..E: date, month, category, amount, description. The optional
//! "Flujo de Caja" tab holds labelled totals.

use crate::error::{Error, Result};
use crate::models::{
    BudgetLimits, FinancialTotals, SheetSnapshot, SpentMap, TransactionRecord, TransactionType,
};
use crate::utils::{normalize_text, parse_flexible_date};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_HISTORY_CAP: usize = 50;

const COL_DATE: usize = 0;
const COL_MONTH: usize = 1;
const COL_CATEGORY: usize = 2;
const COL_AMOUNT: usize = 3;
const COL_DESCRIPTION: usize = 4;

static AMOUNT_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$,]").expect("static pattern"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(?:\d+(?:\.\d+)?|\.\d+)").expect("static pattern"));

pub type Row = Vec<String>;

/// Reads a cell amount. `$` and `,` are ignored and only the leading numeric part
/// counts, so `"$1,200 COP"` is 1200. Blank or non-numeric cells are zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = AMOUNT_NOISE.replace_all(raw.trim(), "");
    let Some(m) = LEADING_NUMBER.find(&cleaned) else {
        if !cleaned.is_empty() {
            debug!("non-numeric amount '{}' coerced to 0", raw);
        }
        return Decimal::ZERO;
    };
    let num = m.as_str().trim_start_matches('+');
    let num = match num.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{}", rest),
        Some(_) => num.to_string(),
        None if num.starts_with('.') => format!("0{}", num),
        None => num.to_string(),
    };
    num.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn cell(row: &[String], ix: usize) -> &str {
    row.get(ix).map(|s| s.as_str()).unwrap_or("")
}

pub fn record_from_row(kind: TransactionType, row: &[String]) -> TransactionRecord {
    TransactionRecord {
        kind,
        date: cell(row, COL_DATE).to_string(),
        month: cell(row, COL_MONTH).to_string(),
        category: cell(row, COL_CATEGORY).to_string(),
        amount: parse_amount(cell(row, COL_AMOUNT)),
        description: cell(row, COL_DESCRIPTION).to_string(),
    }
}

/// `acc + amount`, held at the representable bound instead of overflowing.
fn add_amount(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or_else(|| {
        warn!(%acc, %amount, "amount total overflowed; saturating");
        acc.saturating_add(amount)
    })
}

fn sum_amounts(rows: &[Row]) -> Decimal {
    rows.iter()
        .map(|r| parse_amount(cell(r, COL_AMOUNT)))
        .fold(Decimal::ZERO, add_amount)
}

/// The register tabs plus the optional stats tab, as row lists without headers.
#[derive(Debug, Clone, Default)]
pub struct SheetTabs {
    pub expenses: Vec<Row>,
    pub income: Vec<Row>,
    pub savings: Vec<Row>,
    pub stats: Option<Vec<Row>>,
}

/// Labelled totals from the stats tab; zero where a label was not found.
fn totals_from_stats(stats: &[Row]) -> FinancialTotals {
    let mut t = FinancialTotals::default();
    for row in stats {
        let label = cell(row, 0).to_uppercase();
        let value = || {
            let first = [1, 2, 3]
                .into_iter()
                .map(|ix| cell(row, ix))
                .find(|s| !s.is_empty())
                .unwrap_or("");
            parse_amount(first)
        };
        if label.contains("INGRESOS") && !label.contains("REGISTRO") {
            t.income = value();
        }
        if label.contains("EGRESOS") && !label.contains("REGISTRO") {
            t.expenses = value();
        }
        if label.contains("AHORRO") && !label.contains("REGISTRO") {
            t.savings = value();
        }
        if label.contains("SALDO") || label.contains("DISPONIBLE") {
            t.available = value();
        }
    }
    t
}

fn or_else(sheet: Decimal, computed: Decimal) -> Decimal {
    if sheet.is_zero() { computed } else { sheet }
}

/// Totals plus the `cap` most recent transactions across the three register tabs.
pub fn aggregate(tabs: &SheetTabs, cap: usize) -> SheetSnapshot {
    let sheet = match &tabs.stats {
        Some(stats) => totals_from_stats(stats),
        None => {
            warn!("no stats tab; totals computed from register rows");
            FinancialTotals::default()
        }
    };

    let calc_income = sum_amounts(&tabs.income);
    let calc_expenses = sum_amounts(&tabs.expenses);
    let calc_savings = sum_amounts(&tabs.savings);

    let totals = FinancialTotals {
        available: or_else(sheet.available, calc_income.saturating_sub(calc_expenses)),
        income: or_else(sheet.income, calc_income),
        expenses: or_else(sheet.expenses, calc_expenses),
        savings: or_else(sheet.savings, calc_savings),
    };

    let mut history: Vec<TransactionRecord> = tabs
        .expenses
        .iter()
        .map(|r| record_from_row(TransactionType::Expense, r))
        .chain(
            tabs.income
                .iter()
                .map(|r| record_from_row(TransactionType::Income, r)),
        )
        .chain(
            tabs.savings
                .iter()
                .map(|r| record_from_row(TransactionType::Saving, r)),
        )
        .collect();
    sort_history(&mut history);
    history.truncate(cap);

    debug!(history = history.len(), "aggregated sheet rows");
    SheetSnapshot {
        totals,
        history,
        ..SheetSnapshot::default()
    }
}

/// Most recent first; rows whose date cannot be read go last, in their original order.
pub fn sort_history(history: &mut [TransactionRecord]) {
    history.sort_by_cached_key(|t| std::cmp::Reverse(parse_flexible_date(&t.date)));
}

/// Sums expense rows per trimmed category, optionally only for one month name.
pub fn spent_by_category(expense_rows: &[Row], month: Option<&str>) -> SpentMap {
    let month = month.map(normalize_text);
    let mut out = SpentMap::new();
    for row in expense_rows {
        if let Some(m) = &month {
            if normalize_text(cell(row, COL_MONTH)) != *m {
                continue;
            }
        }
        let category = cell(row, COL_CATEGORY).trim();
        if category.is_empty() {
            continue;
        }
        let total = out.entry(category.to_string()).or_insert(Decimal::ZERO);
        *total = add_amount(*total, parse_amount(cell(row, COL_AMOUNT)));
    }
    out
}

/// Limits from a two-column tab: category, monthly limit.
pub fn limits_from_rows(rows: &[Row]) -> BudgetLimits {
    rows.iter()
        .filter(|r| !cell(r, 0).trim().is_empty())
        .map(|r| (cell(r, 0).trim().to_string(), parse_amount(cell(r, 1))))
        .collect()
}

/// Reads a CSV export of one tab. The header row is skipped and ragged rows are kept.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result.map_err(csv_err)?;
        let row: Row = rec.iter().map(|s| s.to_string()).collect();
        if row.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    debug!(path = %path.display(), rows = rows.len(), "read sheet export");
    Ok(rows)
}
