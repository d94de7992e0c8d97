// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword rules that map a free-text category to an icon tag.

use crate::models::TransactionType;
use crate::utils::normalize_text;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconTag {
    Food,
    Transport,
    Housing,
    Utilities,
    Finance,
    Education,
    Entertainment,
    Phone,
    Health,
    Family,
    Gifts,
    Savings,
    Travel,
    Insurance,
    Income,
    General,
}

impl IconTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconTag::Food => "food",
            IconTag::Transport => "transport",
            IconTag::Housing => "housing",
            IconTag::Utilities => "utilities",
            IconTag::Finance => "finance",
            IconTag::Education => "education",
            IconTag::Entertainment => "entertainment",
            IconTag::Phone => "phone",
            IconTag::Health => "health",
            IconTag::Family => "family",
            IconTag::Gifts => "gifts",
            IconTag::Savings => "savings",
            IconTag::Travel => "travel",
            IconTag::Insurance => "insurance",
            IconTag::Income => "income",
            IconTag::General => "general",
        }
    }
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in rules in priority order. "gasolina" must reach transport before the
/// utilities rule sees "gas".
pub const BUILTIN_RULES: &[(IconTag, &[&str])] = &[
    (IconTag::Food, &["mercado", "comida", "restaurante"]),
    (
        IconTag::Transport,
        &["transporte", "moto", "gasolina", "carro", "taxi"],
    ),
    (IconTag::Housing, &["arriendo", "vivienda", "casa", "hogar"]),
    (IconTag::Utilities, &["servicios", "luz", "agua", "gas"]),
    (IconTag::Finance, &["banco", "financiero", "tarjeta"]),
    (
        IconTag::Education,
        &["educacion", "estudio", "colegio", "aerografia"],
    ),
    (
        IconTag::Entertainment,
        &["spotify", "netflix", "entretenimiento", "ocio"],
    ),
    (IconTag::Phone, &["celular", "telefono", "plan"]),
    (IconTag::Health, &["salud", "medico", "gym"]),
    (IconTag::Family, &["familia", "hijos"]),
    (IconTag::Gifts, &["regalo", "navidad", "cumple"]),
    (IconTag::Savings, &["ahorro", "personal"]),
    (IconTag::Travel, &["viaje"]),
    (
        IconTag::Insurance,
        &["seguro", "soat", "proteccion", "imprevistos"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub tag: IconTag,
    pub keywords: Vec<String>,
}

impl Rule {
    pub fn new<S: AsRef<str>>(tag: IconTag, keywords: &[S]) -> Self {
        Self {
            tag,
            keywords: keywords
                .iter()
                .map(|k| normalize_text(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, normalized_label: &str) -> bool {
        self.keywords.iter().any(|k| normalized_label.contains(k.as_str()))
    }
}

/// An ordered rule table; the first rule with a keyword contained in the label wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    fallback: IconTag,
}

static BUILTIN: Lazy<Classifier> = Lazy::new(|| {
    Classifier::new(
        BUILTIN_RULES
            .iter()
            .map(|(tag, kws)| Rule::new(*tag, kws))
            .collect(),
    )
});

impl Default for Classifier {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fallback: IconTag::General,
        }
    }

    /// Built-in table with `extra` rules evaluated ahead of it.
    pub fn with_extra_rules(extra: &[Rule]) -> Self {
        let mut c = Self::default();
        let mut rules = Vec::with_capacity(extra.len() + c.rules.len());
        rules.extend(extra.iter().map(|r| Rule::new(r.tag, &r.keywords)));
        rules.append(&mut c.rules);
        c.rules = rules;
        c
    }

    /// The shared built-in table, normalised once per process.
    pub fn builtin() -> &'static Classifier {
        &BUILTIN
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, label: &str) -> IconTag {
        let lower = normalize_text(label);
        self.rules
            .iter()
            .find(|r| r.matches(&lower))
            .map(|r| r.tag)
            .unwrap_or(self.fallback)
    }

    /// History rows: income is always tagged as income, whatever the category says.
    pub fn classify_transaction(&self, kind: TransactionType, label: &str) -> IconTag {
        if kind == TransactionType::Income {
            return IconTag::Income;
        }
        self.classify(label)
    }
}

/// Classifies with the built-in table.
pub fn classify(label: &str) -> IconTag {
    BUILTIN.classify(label)
}
