// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

/// Failures at the edges of the library: reading config, snapshots and sheet exports.
/// The matching, classification and aggregation code never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}'", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid sheet snapshot")]
    Snapshot(#[from] serde_json::Error),

    #[error("sheet bridge reported an error: {0}")]
    Bridge(String),

    #[error("could not parse sheet export '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unrecognised date '{0}'")]
    Date(String),

    #[error("unknown transaction type '{0}', expected income, expense or saving")]
    TransactionType(String),

    #[error("unknown filter '{0}', expected todo, gastos or ahorros")]
    Filter(String),

    #[error("could not determine platform-specific config dir")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
