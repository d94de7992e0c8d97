// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod importer;
pub mod reports;
pub mod transactions;

use crate::models::SheetSnapshot;
use anyhow::{Context, Result};
use std::path::Path;

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", id))
}

pub(crate) fn load_snapshot(m: &clap::ArgMatches) -> Result<SheetSnapshot> {
    let path = required(m, "snapshot")?.trim();
    SheetSnapshot::load(Path::new(path)).with_context(|| format!("Load snapshot {}", path))
}
