// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget cards: spend against monthly limits, one card per category with activity.
//!
//! Amounts are taken as already cleaned. Non-numeric cells must have been coerced to
//! zero by whoever produced the maps (see [`crate::sheet::parse_amount`]).

use crate::classifier::{Classifier, IconTag};
use crate::models::{BudgetLimits, SpentMap, normalize_keys};
use crate::utils::format_currency;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const DEFAULT_SAVINGS_KEYWORDS: &[&str] = &["ahorro", "proteccion", "adecuaciones"];

/// Thresholds and vocabulary that decide a card's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPolicy {
    /// Above this ratio a card is near its limit.
    pub near_limit_ratio: Decimal,
    /// Above this ratio a card has exceeded its limit.
    pub over_limit_ratio: Decimal,
    pub savings_keywords: Vec<String>,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            near_limit_ratio: Decimal::new(8, 1),
            over_limit_ratio: Decimal::ONE,
            savings_keywords: DEFAULT_SAVINGS_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl BudgetPolicy {
    /// Plain lowercase containment. Accents are significant here, unlike in search:
    /// "Protección" does not match the keyword "proteccion".
    pub fn is_savings(&self, category: &str) -> bool {
        let name = category.trim().to_lowercase();
        self.savings_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && name.contains(&k))
    }

    fn status_for(&self, progress: Decimal) -> BudgetStatus {
        if progress > self.over_limit_ratio {
            BudgetStatus::Excedido
        } else if progress > self.near_limit_ratio {
            BudgetStatus::CercaAlLimite
        } else {
            BudgetStatus::DentroDelLimite
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    Ahorro,
    DentroDelLimite,
    CercaAlLimite,
    Excedido,
    GastoAdicional,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Ahorro => "AHORRO",
            BudgetStatus::DentroDelLimite => "DENTRO DEL LÍMITE",
            BudgetStatus::CercaAlLimite => "CERCA AL LÍMITE",
            BudgetStatus::Excedido => "EXCEDIDO",
            BudgetStatus::GastoAdicional => "GASTO ADICIONAL",
        }
    }

    // Lower sorts first.
    fn priority(&self) -> u8 {
        match self {
            BudgetStatus::Excedido => 0,
            BudgetStatus::CercaAlLimite => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caption under the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Remaining {
    Percent(u32),
    /// Budgeted category whose limit is zero.
    CurrentAmount,
    /// Spend with no budget line at all.
    CurrentSpend,
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Percent(p) => write!(f, "{}% restante", p),
            Remaining::CurrentAmount => f.write_str("Monto actual"),
            Remaining::CurrentSpend => f.write_str("Consumo actual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCard {
    pub category: String,
    pub spent: Decimal,
    /// The limit from the sheet; `None` for unbudgeted spend.
    pub declared_limit: Option<Decimal>,
    /// Denominator for the bar: the declared limit, else the spend, else 1.
    pub limit: Decimal,
    /// `spent / declared_limit`, unclamped; zero without a positive limit.
    pub progress: Decimal,
    pub status: BudgetStatus,
    pub remaining: Remaining,
    pub hide_progress: bool,
    pub is_savings: bool,
    pub icon: IconTag,
}

impl BudgetCard {
    /// Bar fill in `[0, 1]`.
    pub fn bar_ratio(&self) -> Decimal {
        if self.limit.is_zero() {
            return Decimal::ZERO;
        }
        ratio(self.spent, self.limit).clamp(Decimal::ZERO, Decimal::ONE)
    }

    pub fn is_unexpected(&self) -> bool {
        self.status == BudgetStatus::GastoAdicional
    }

    pub fn subtitle(&self, ccy: &str) -> String {
        match self.declared_limit {
            None => "No presupuestado".to_string(),
            Some(l) if l > Decimal::ZERO => format!("Presupuesto: {}", format_currency(l, ccy)),
            Some(_) => "Sin límite mensual".to_string(),
        }
    }
}

/// Builds budget cards from limits and spend using a policy and an icon classifier.
#[derive(Debug, Clone, Default)]
pub struct BudgetAggregator {
    policy: BudgetPolicy,
    classifier: Classifier,
}

impl BudgetAggregator {
    pub fn new(policy: BudgetPolicy, classifier: Classifier) -> Self {
        Self { policy, classifier }
    }

    /// One card per category in either map, ordered EXCEDIDO, then CERCA AL LÍMITE,
    /// then everything else by descending spend. Keys are trimmed first.
    pub fn build(&self, limits: &BudgetLimits, spent: &SpentMap) -> Vec<BudgetCard> {
        let limits = normalize_keys(limits);
        let spent = normalize_keys(spent);

        let mut cards: Vec<BudgetCard> = limits
            .iter()
            .map(|(category, limit)| {
                let amount = spent.get(category).copied().unwrap_or(Decimal::ZERO);
                self.budgeted_card(category, *limit, amount)
            })
            .collect();
        let budgeted = cards.len();

        cards.extend(
            spent
                .iter()
                .filter(|(category, _)| !limits.contains_key(category.as_str()))
                .map(|(category, amount)| self.unexpected_card(category, *amount)),
        );
        debug!(
            budgeted,
            unexpected = cards.len() - budgeted,
            "built budget view"
        );

        sort_cards(&mut cards);
        cards
    }

    fn budgeted_card(&self, category: &str, limit: Decimal, spent: Decimal) -> BudgetCard {
        let has_limit = limit > Decimal::ZERO;
        let progress = if has_limit {
            ratio(spent, limit)
        } else {
            Decimal::ZERO
        };
        let effective = if has_limit {
            limit
        } else if !spent.is_zero() {
            spent
        } else {
            Decimal::ONE
        };

        let is_savings = self.policy.is_savings(category);
        let status = if is_savings {
            BudgetStatus::Ahorro
        } else {
            self.policy.status_for(progress)
        };

        let remaining = if has_limit {
            let used = progress
                .saturating_mul(Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            let left = Decimal::ONE_HUNDRED
                .saturating_sub(used)
                .max(Decimal::ZERO);
            Remaining::Percent(left.to_u32().unwrap_or(0))
        } else {
            Remaining::CurrentAmount
        };

        BudgetCard {
            category: category.to_string(),
            spent,
            declared_limit: Some(limit),
            limit: effective,
            progress,
            status,
            remaining,
            hide_progress: !has_limit,
            is_savings,
            icon: self.classifier.classify(category),
        }
    }

    fn unexpected_card(&self, category: &str, spent: Decimal) -> BudgetCard {
        BudgetCard {
            category: category.to_string(),
            spent,
            declared_limit: None,
            limit: spent,
            progress: Decimal::ZERO,
            status: BudgetStatus::GastoAdicional,
            remaining: Remaining::CurrentSpend,
            hide_progress: true,
            is_savings: self.policy.is_savings(category),
            icon: self.classifier.classify(category),
        }
    }
}

/// `spent / limit`, saturating at `Decimal::MAX` (or `MIN`) when the quotient does not fit.
fn ratio(spent: Decimal, limit: Decimal) -> Decimal {
    spent.checked_div(limit).unwrap_or_else(|| {
        debug!(%spent, %limit, "spend ratio overflowed; saturating");
        if spent.is_sign_negative() != limit.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Stable sort by status priority, then by descending spend.
pub fn sort_cards(cards: &mut [BudgetCard]) {
    cards.sort_by(|a, b| {
        a.status
            .priority()
            .cmp(&b.status.priority())
            .then_with(|| b.spent.cmp(&a.spent))
    });
}

/// [`BudgetAggregator::build`] with the default policy and rule table.
pub fn build_budget_view(limits: &BudgetLimits, spent: &SpentMap) -> Vec<BudgetCard> {
    BudgetAggregator::default().build(limits, spent)
}
