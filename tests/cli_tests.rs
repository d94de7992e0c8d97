// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finanzas::budget::BudgetStatus;
use finanzas::classifier::IconTag;
use finanzas::cli;
use finanzas::commands::{budgets, categories, importer, transactions};
use finanzas::config::Config;
use finanzas::error::Error;
use finanzas::models::{NewTransaction, SheetSnapshot, TransactionType};
use finanzas::utils::{derive_month_name, format_currency, month_name};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
  "totals": {"available": 880000, "income": "1,000,000", "expenses": 120000, "savings": null},
  "history": [
    {"type": "expense", "date": "2025-01-19", "month": "Enero", "category": "Comida", "amount": "$20,000", "description": "almuerzo"},
    {"type": "income", "date": "2025-01-18", "month": "Enero", "category": "Salario", "amount": 1000000, "description": ""},
    {"type": "expense", "date": "2025-01-17", "month": "", "category": "Transporte", "amount": 15000, "description": "taxi"},
    {"type": "saving", "date": "2025-01-16", "month": "Enero", "category": "Ahorro vivienda", "amount": 300000, "description": ""}
  ],
  "categories": {
    "months": ["Enero", "Febrero"],
    "expenses": ["Moto", "Mercado", "Médico"],
    "income": ["Salario"],
    "savings": ["Ahorro vivienda"]
  },
  "budgetLimits": {"Arriendo": 1000, "Comida": 100, "Transporte": 200, "Ahorro vivienda": "300"},
  "spentMap": {"Arriendo": 500, "Comida": 150, "Transporte": 170, "Ahorro vivienda": 300, "Regalo": 50}
}"#;

fn snapshot_file() -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(SNAPSHOT.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    for l in lines {
        writeln!(f, "{}", l).unwrap();
    }
    f.flush().unwrap();
    f
}

#[test]
fn snapshot_amounts_are_lenient() {
    let snap = SheetSnapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(snap.totals.income, Decimal::from(1_000_000));
    assert_eq!(snap.totals.savings, Decimal::ZERO);
    assert_eq!(snap.history[0].amount, Decimal::from(20_000));
    assert_eq!(snap.budget_limits["Ahorro vivienda"], Decimal::from(300));
    assert_eq!(snap.history[2].display_month(), "Enero");
}

#[test]
fn bridge_error_body_is_reported() {
    let err = SheetSnapshot::from_json(r#"{"error": "Sheet not found"}"#).unwrap_err();
    assert!(matches!(err, Error::Bridge(ref m) if m == "Sheet not found"), "{err}");
    assert!(SheetSnapshot::from_json("not json").is_err());
    assert!(SheetSnapshot::from_json("{}").unwrap().history.is_empty());
}

#[test]
fn month_names() {
    assert_eq!(derive_month_name("2025-03-15").unwrap(), "Marzo");
    assert_eq!(derive_month_name("15/12/2024").unwrap(), "Diciembre");
    assert_eq!(derive_month_name(" 2025-01-01 ").unwrap(), "Enero");
    assert!(matches!(derive_month_name("mañana"), Err(Error::Date(_))));
    let d = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    assert_eq!(month_name(d), "Septiembre");
}

#[test]
fn currency_formatting() {
    assert_eq!(format_currency(Decimal::from(1_234_567), "COP"), "COP $ 1.234.567");
    assert_eq!(format_currency(Decimal::ZERO, "COP"), "COP $ 0");
    assert_eq!(format_currency(Decimal::from(-1500), "COP"), "COP -$ 1.500");
    assert_eq!(format_currency("999.5".parse().unwrap(), "COP"), "COP $ 1.000");
    assert_eq!(format_currency(Decimal::from(100), "USD"), "USD $ 100");
}

#[test]
fn budget_show_from_snapshot() {
    let f = snapshot_file();
    let path = f.path().to_str().unwrap();
    let m = cli::build_cli().get_matches_from(["finanzas", "budget", "show", "--snapshot", path]);
    let (_, sub) = m.subcommand().unwrap();
    let (_, show) = sub.subcommand().unwrap();
    let cards = budgets::query_cards(&Config::default(), show).unwrap();
    let names: Vec<&str> = cards.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(
        names,
        vec!["Comida", "Transporte", "Arriendo", "Ahorro vivienda", "Regalo"]
    );
    assert_eq!(cards[0].status, BudgetStatus::Excedido);
    assert_eq!(cards[3].status, BudgetStatus::Ahorro);
}

#[test]
fn budget_show_filter_and_search() {
    let f = snapshot_file();
    let path = f.path().to_str().unwrap();
    let cfg = Config::default();

    let m = cli::build_cli().get_matches_from([
        "finanzas", "budget", "show", "-s", path, "--filter", "ahorros",
    ]);
    let show = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let cards = budgets::query_cards(&cfg, show).unwrap();
    assert_eq!(cards.len(), 1);
    assert!(cards[0].is_savings);

    let m = cli::build_cli().get_matches_from([
        "finanzas", "budget", "show", "-s", path, "--search", "regal",
    ]);
    let show = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let cards = budgets::query_cards(&cfg, show).unwrap();
    assert_eq!(cards[0].category, "Regalo");
}

#[test]
fn budget_show_top_uses_recent_history() {
    let f = snapshot_file();
    let path = f.path().to_str().unwrap();
    let m = cli::build_cli().get_matches_from(["finanzas", "budget", "show", "-s", path, "--top"]);
    let show = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let cards = budgets::query_cards(&Config::default(), show).unwrap();
    let names: Vec<&str> = cards.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Comida", "Transporte", "Ahorro vivienda"]);
}

#[test]
fn category_icon_command() {
    let cfg = Config::default();
    let m = cli::build_cli().get_matches_from(["finanzas", "category", "icon", "SOAT vehiculo"]);
    let icon = m.subcommand().unwrap().1.subcommand().unwrap().1;
    assert_eq!(categories::icon_for(&cfg, icon).unwrap(), IconTag::Insurance);

    let m = cli::build_cli().get_matches_from([
        "finanzas", "category", "icon", "Mercado", "--type", "ingreso",
    ]);
    let icon = m.subcommand().unwrap().1.subcommand().unwrap().1;
    assert_eq!(categories::icon_for(&cfg, icon).unwrap(), IconTag::Income);
}

#[test]
fn category_search_command() {
    let f = snapshot_file();
    let path = f.path().to_str().unwrap();
    let m = cli::build_cli().get_matches_from([
        "finanzas", "category", "search", "-s", path, "--type", "gasto", "-q", "me",
    ]);
    let search = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let names = categories::query_search(&Config::default(), search).unwrap();
    assert_eq!(names, vec!["Mercado", "Médico", "Moto"]);
}

#[test]
fn tx_list_filters_and_tags_rows() {
    let f = snapshot_file();
    let path = f.path().to_str().unwrap();
    let cfg = Config::default();

    let m = cli::build_cli().get_matches_from(["finanzas", "tx", "list", "-s", path]);
    let list = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let rows = transactions::query_rows(&cfg, list).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].icon, "food");
    assert_eq!(rows[0].amount, "COP $ 20.000");
    assert_eq!(rows[1].icon, "income");
    assert_eq!(rows[2].month, "Enero");

    let m = cli::build_cli().get_matches_from([
        "finanzas", "tx", "list", "-s", path, "--type", "gastos", "--limit", "1",
    ]);
    let list = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let rows = transactions::query_rows(&cfg, list).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TransactionType::Expense);
}

#[test]
fn tx_new_derives_month() {
    let m = cli::build_cli().get_matches_from([
        "finanzas", "tx", "new", "--type", "gasto", "--amount", "25000", "--category",
        " Mercado ", "--date", "2025-03-10",
    ]);
    let new = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let tx = transactions::build_new(new).unwrap();
    assert_eq!(tx.kind, TransactionType::Expense);
    assert_eq!(tx.category, "Mercado");
    assert_eq!(tx.month.as_deref(), Some("Marzo"));

    let body = serde_json::to_value(&tx).unwrap();
    assert_eq!(body["type"], "expense");
    assert_eq!(body["date"], "2025-03-10");
    assert_eq!(body["month"], "Marzo");
}

#[test]
fn tx_new_keeps_explicit_month_and_rejects_bad_input() {
    let m = cli::build_cli().get_matches_from([
        "finanzas", "tx", "new", "-t", "ahorro", "--amount", "10", "--category", "Ahorro",
        "--date", "2025-03-10", "--month", "Febrero",
    ]);
    let new = m.subcommand().unwrap().1.subcommand().unwrap().1;
    assert_eq!(
        transactions::build_new(new).unwrap().month.as_deref(),
        Some("Febrero")
    );

    let m = cli::build_cli().get_matches_from([
        "finanzas", "tx", "new", "-t", "gasto", "--amount=-5", "--category", "Mercado",
    ]);
    let new = m.subcommand().unwrap().1.subcommand().unwrap().1;
    assert!(transactions::build_new(new).is_err());

    let m = cli::build_cli().get_matches_from([
        "finanzas", "tx", "new", "-t", "gasto", "--amount", "5", "--category", "  ",
    ]);
    let new = m.subcommand().unwrap().1.subcommand().unwrap().1;
    assert!(transactions::build_new(new).is_err());
}

#[test]
fn new_transaction_month_helper() {
    let d = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
    let tx = NewTransaction::new(TransactionType::Saving, Decimal::from(5), "Ahorro", "", d);
    assert_eq!(tx.with_derived_month().month.as_deref(), Some("Diciembre"));
}

#[test]
fn import_sheets_builds_snapshot() {
    let expenses = csv_file(&[
        "Fecha,Mes,Categoria,Monto,Descripcion",
        "2025-01-10,Enero,Mercado,\"$100,000\",super",
        "2025-02-03,Febrero,Mercado,7000,",
        "2025-01-15,Enero,Transporte,20000,",
    ]);
    let income = csv_file(&["Fecha,Mes,Categoria,Monto", "2025-01-01,Enero,Salario,1000000"]);
    let savings = csv_file(&["Fecha,Mes,Categoria,Monto"]);
    let limits = csv_file(&["Categoria,Limite", "Mercado,90000", "Arriendo,800000"]);

    let m = cli::build_cli().get_matches_from([
        "finanzas",
        "import",
        "sheets",
        "--expenses",
        expenses.path().to_str().unwrap(),
        "--income",
        income.path().to_str().unwrap(),
        "--savings",
        savings.path().to_str().unwrap(),
        "--limits",
        limits.path().to_str().unwrap(),
        "--month",
        "enero",
    ]);
    let sheets = m.subcommand().unwrap().1.subcommand().unwrap().1;
    let snap = importer::build_snapshot(&Config::default(), sheets).unwrap();

    assert_eq!(snap.history.len(), 4);
    assert_eq!(snap.history[0].date, "2025-02-03");
    assert_eq!(snap.totals.expenses, Decimal::from(127_000));
    assert_eq!(snap.spent_map["Mercado"], Decimal::from(100_000));
    assert_eq!(snap.spent_map.len(), 2);
    assert_eq!(snap.budget_limits["Arriendo"], Decimal::from(800_000));

    let cards = Config::default()
        .aggregator()
        .build(&snap.budget_limits, &snap.spent_map);
    assert_eq!(cards[0].category, "Mercado");
    assert_eq!(cards[0].status, BudgetStatus::Excedido);
}

#[test]
fn config_file_overrides_defaults() {
    let mut f = NamedTempFile::new().unwrap();
    write!(
        f,
        r#"{{"near_limit_ratio": 0.5, "currency": "USD",
            "extra_rules": [{{"tag": "travel", "keywords": ["Mercado Libre"]}}]}}"#
    )
    .unwrap();
    f.flush().unwrap();

    let cfg = Config::load(Some(f.path())).unwrap();
    assert_eq!(cfg.near_limit_ratio, Decimal::new(5, 1));
    assert_eq!(cfg.over_limit_ratio, Decimal::ONE);
    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.history_cap, 50);
    assert_eq!(cfg.classifier().classify("Compra mercado libre"), IconTag::Travel);
    assert_eq!(cfg.classifier().classify("Mercado"), IconTag::Food);
}

#[test]
fn explicit_config_must_exist_and_parse() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.json");
    assert!(matches!(Config::load(Some(&missing)), Err(Error::Read { .. })));

    let mut f = NamedTempFile::new().unwrap();
    write!(f, "{{ not json").unwrap();
    f.flush().unwrap();
    assert!(matches!(Config::load(Some(f.path())), Err(Error::Config { .. })));
}
