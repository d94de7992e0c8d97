// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings file, `config.json` in the platform config dir unless `--config` points
//! elsewhere. Every field is optional.

use crate::budget::{BudgetAggregator, BudgetPolicy};
use crate::classifier::{Classifier, Rule};
use crate::error::{Error, Result};
use crate::fuzzy::DEFAULT_THRESHOLD;
use crate::sheet::DEFAULT_HISTORY_CAP;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Finanzas", "finanzas"));

const CONFIG_JSON: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub near_limit_ratio: Decimal,
    pub over_limit_ratio: Decimal,
    pub savings_keywords: Vec<String>,
    pub history_cap: usize,
    pub match_threshold: f64,
    pub recent_window: usize,
    pub recent_count: usize,
    /// Checked before the built-in classifier rules.
    pub extra_rules: Vec<Rule>,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        let policy = BudgetPolicy::default();
        Self {
            near_limit_ratio: policy.near_limit_ratio,
            over_limit_ratio: policy.over_limit_ratio,
            savings_keywords: policy.savings_keywords,
            history_cap: DEFAULT_HISTORY_CAP,
            match_threshold: DEFAULT_THRESHOLD,
            recent_window: 20,
            recent_count: 3,
            extra_rules: Vec::new(),
            currency: "COP".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(Error::NoConfigDir)?;
    Ok(proj.config_dir().join(CONFIG_JSON))
}

impl Config {
    /// Loads `explicit` if given (it must exist), else the default location, else
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = match config_path() {
                    Ok(p) => p,
                    Err(e) => {
                        debug!("{e}; using defaults");
                        return Ok(Self::default());
                    }
                };
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    debug!("no config at {}; using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Config = serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn budget_policy(&self) -> BudgetPolicy {
        BudgetPolicy {
            near_limit_ratio: self.near_limit_ratio,
            over_limit_ratio: self.over_limit_ratio,
            savings_keywords: self.savings_keywords.clone(),
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::with_extra_rules(&self.extra_rules)
    }

    pub fn aggregator(&self) -> BudgetAggregator {
        BudgetAggregator::new(self.budget_policy(), self.classifier())
    }
}
