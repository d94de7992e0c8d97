// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::BudgetCard;
use crate::error::{Error, Result};
use crate::fuzzy::{self, Ranked};
use crate::models::{SheetCategories, TransactionRecord, TransactionType};
use std::str::FromStr;

/// Chip filter over budget cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetFilter {
    #[default]
    All,
    Expenses,
    Savings,
}

impl BudgetFilter {
    pub fn accepts(&self, card: &BudgetCard) -> bool {
        match self {
            BudgetFilter::All => true,
            BudgetFilter::Expenses => !card.is_savings,
            BudgetFilter::Savings => card.is_savings,
        }
    }
}

impl FromStr for BudgetFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "todo" | "all" => Ok(BudgetFilter::All),
            "gastos" | "expenses" => Ok(BudgetFilter::Expenses),
            "ahorros" | "savings" => Ok(BudgetFilter::Savings),
            _ => Err(Error::Filter(s.to_string())),
        }
    }
}

/// Applies `filter`, then ranks by fuzzy score against `query`.
pub fn search_cards<'a>(
    cards: &'a [BudgetCard],
    filter: BudgetFilter,
    query: &str,
    threshold: f64,
) -> Vec<Ranked<&'a BudgetCard>> {
    fuzzy::rank(
        cards.iter().filter(|c| filter.accepts(c)),
        query,
        threshold,
        |c| c.category.as_str(),
    )
}

/// Distinct category names from recent non-income activity, most recent first.
pub fn recent_categories(
    history: &[TransactionRecord],
    window: usize,
    count: usize,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for t in history
        .iter()
        .filter(|t| t.kind != TransactionType::Income && !t.category.trim().is_empty())
        .take(window)
    {
        let name = t.category.trim();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        if names.len() == count {
            break;
        }
    }
    names
}

/// Cards for the recently used categories, topped up from the head of `cards`.
pub fn top_recent_cards<'a>(
    cards: &'a [BudgetCard],
    recent: &[String],
    count: usize,
) -> Vec<&'a BudgetCard> {
    if recent.is_empty() {
        return cards.iter().take(count).collect();
    }

    let mut top: Vec<&BudgetCard> = recent
        .iter()
        .filter_map(|name| cards.iter().find(|c| &c.category == name))
        .take(count)
        .collect();
    if top.len() < count {
        let missing = count - top.len();
        top.extend(
            cards
                .iter()
                .filter(|c| !recent.contains(&c.category))
                .take(missing),
        );
    }
    top
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl HistoryFilter {
    pub fn accepts(&self, record: &TransactionRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Only(kind) => record.kind == *kind,
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "todo" | "all" => Ok(HistoryFilter::All),
            other => other.parse().map(HistoryFilter::Only),
        }
    }
}

pub fn filter_history(
    history: &[TransactionRecord],
    filter: HistoryFilter,
) -> Vec<&TransactionRecord> {
    history.iter().filter(|t| filter.accepts(t)).collect()
}

/// Category picker for the transaction form: the list for `kind`, narrowed by `query`.
pub fn category_choices<'a>(
    categories: &'a SheetCategories,
    kind: TransactionType,
    query: &str,
    threshold: f64,
) -> Vec<&'a str> {
    fuzzy::search(categories.for_type(kind), query, threshold)
}
