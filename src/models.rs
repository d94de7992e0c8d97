// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::utils::{month_name, parse_flexible_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Category name to monthly ceiling. A category that is absent has no ceiling.
pub type BudgetLimits = BTreeMap<String, Decimal>;

/// Category name to the amount already spent in the current period.
pub type SpentMap = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Saving,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Saving => "saving",
        }
    }

    /// Label used by the app's filter chips and form buttons.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Ingreso",
            TransactionType::Expense => "Gasto",
            TransactionType::Saving => "Ahorro",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" | "ingresos" => Ok(TransactionType::Income),
            "expense" | "expenses" | "gasto" | "gastos" | "egreso" | "egresos" => {
                Ok(TransactionType::Expense)
            }
            "saving" | "savings" | "ahorro" | "ahorros" => Ok(TransactionType::Saving),
            _ => Err(Error::TransactionType(s.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One financial event as delivered by the sheet bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}

impl TransactionRecord {
    /// The month column, or the month derived from `date` when the column is blank.
    pub fn display_month(&self) -> String {
        let month = self.month.trim();
        if !month.is_empty() {
            return month.to_string();
        }
        parse_flexible_date(&self.date)
            .map(|d| month_name(d).to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTotals {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub available: Decimal,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub income: Decimal,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub expenses: Decimal,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub savings: Decimal,
}

/// Category lists per transaction type, as maintained in the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetCategories {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<String>,
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub savings: Vec<String>,
}

impl SheetCategories {
    pub fn for_type(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expenses,
            TransactionType::Saving => &self.savings,
        }
    }
}

/// Everything the dashboard needs from one refresh of the sheet bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSnapshot {
    #[serde(default)]
    pub totals: FinancialTotals,
    #[serde(default)]
    pub history: Vec<TransactionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<SheetCategories>,
    #[serde(default, deserialize_with = "lenient::amount_map")]
    pub budget_limits: BudgetLimits,
    #[serde(default, deserialize_with = "lenient::amount_map")]
    pub spent_map: SpentMap,
}

impl SheetSnapshot {
    /// Parses a bridge response. A body of the form `{"error": "..."}` is reported as
    /// [`Error::Bridge`] rather than as an empty snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if let Some(err) = value.get("error").filter(|e| !e.is_null()) {
            let msg = err
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| err.to_string());
            return Err(Error::Bridge(msg));
        }
        let snapshot: SheetSnapshot = serde_json::from_value(value)?;
        tracing::debug!(
            history = snapshot.history.len(),
            limits = snapshot.budget_limits.len(),
            spent = snapshot.spent_map.len(),
            "parsed sheet snapshot"
        );
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Payload sent to the sheet bridge when the user records a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
            date,
            month: None,
        }
    }

    /// Fills `month` from `date` unless the caller already supplied one.
    pub fn with_derived_month(mut self) -> Self {
        let missing = self.month.as_deref().is_none_or(|m| m.trim().is_empty());
        if missing {
            self.month = Some(month_name(self.date).to_string());
        }
        self
    }
}

/// Trims every key. When two keys collide after trimming the later one wins.
pub fn normalize_keys(map: &BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
    map.iter()
        .map(|(k, v)| (k.trim().to_string(), *v))
        .collect()
}

/// Spreadsheet cells arrive as numbers, formatted strings, nulls or junk.
/// Amounts that cannot be read are taken as zero.
mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    pub(super) fn amount_from_value(v: &Value) -> Decimal {
        match v {
            Value::Number(n) => {
                let s = n.to_string();
                s.parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(&s))
                    .unwrap_or_else(|_| {
                        tracing::debug!("non-numeric amount {} coerced to 0", s);
                        Decimal::ZERO
                    })
            }
            Value::String(s) => crate::sheet::parse_amount(s),
            _ => Decimal::ZERO,
        }
    }

    pub(super) fn amount<'de, D>(d: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(d)?;
        Ok(amount_from_value(&v))
    }

    pub(super) fn amount_map<'de, D>(d: D) -> Result<BTreeMap<String, Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, Value>> = Option::deserialize(d)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| {
                let amt = amount_from_value(&v);
                (k, amt)
            })
            .collect())
    }

    pub(super) fn text<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(d)?;
        Ok(match v {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}
