// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .long("snapshot")
        .short('s')
        .value_name("FILE")
        .required(true)
        .help("Sheet snapshot JSON (as returned by the sheet bridge)")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .value_name("TYPE")
        .help("income | expense | saving (ingreso | gasto | ahorro)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("finanzas")
        .about("Budget cards, category search and sheet aggregation for personal finances")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("Config file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .default_value("warn")
                .help("off, error, warn, info, debug or trace; RUST_LOG overrides"),
        )
        .subcommand(
            Command::new("budget").about("Budget cards").subcommand(
                Command::new("show")
                    .about("Budget status per category, most urgent first")
                    .arg(snapshot_arg())
                    .arg(
                        Arg::new("filter")
                            .long("filter")
                            .value_name("FILTER")
                            .default_value("todo")
                            .help("todo | gastos | ahorros"),
                    )
                    .arg(
                        Arg::new("search")
                            .long("search")
                            .value_name("QUERY")
                            .help("Fuzzy category search"),
                    )
                    .arg(
                        Arg::new("top")
                            .long("top")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("search")
                            .help("Only the cards for recently used categories"),
                    )
                    .args(json_args()),
            ),
        )
        .subcommand(
            Command::new("category")
                .about("Category icons and search")
                .subcommand(
                    Command::new("icon")
                        .about("Icon tag for a category label")
                        .arg(Arg::new("label").required(true).value_name("LABEL"))
                        .arg(type_arg()),
                )
                .subcommand(
                    Command::new("search")
                        .about("Category picker search for a transaction type")
                        .arg(snapshot_arg())
                        .arg(type_arg().required(true))
                        .arg(
                            Arg::new("query")
                                .long("query")
                                .short('q')
                                .value_name("QUERY")
                                .default_value(""),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("list")
                        .about("Recent transactions from a snapshot")
                        .arg(snapshot_arg())
                        .arg(type_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("N")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("new")
                        .about("Build the payload for a new transaction")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("description").long("description").default_value(""))
                        .arg(Arg::new("month").long("month")),
                ),
        )
        .subcommand(
            Command::new("report").about("Reports").subcommand(
                Command::new("totals")
                    .about("Available, income, expenses and savings")
                    .arg(snapshot_arg())
                    .args(json_args()),
            ),
        )
        .subcommand(
            Command::new("import").about("Build snapshots").subcommand(
                Command::new("sheets")
                    .about("Aggregate CSV exports of the register tabs into a snapshot")
                    .arg(Arg::new("expenses").long("expenses").required(true))
                    .arg(Arg::new("income").long("income").required(true))
                    .arg(Arg::new("savings").long("savings").required(true))
                    .arg(Arg::new("stats").long("stats").help("Flujo de Caja export"))
                    .arg(
                        Arg::new("limits")
                            .long("limits")
                            .help("Two-column export: category, limit"),
                    )
                    .arg(
                        Arg::new("month")
                            .long("month")
                            .help("Only count expenses of this month name in the spend map"),
                    )
                    .arg(Arg::new("out").long("out").short('o').value_name("FILE")),
            ),
        )
}
