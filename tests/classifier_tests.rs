// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finanzas::classifier::{BUILTIN_RULES, Classifier, IconTag, Rule, classify};
use finanzas::models::TransactionType;

#[test]
fn keyword_groups() {
    assert_eq!(classify("Compra en Mercado Central"), IconTag::Food);
    assert_eq!(classify("SOAT vehiculo"), IconTag::Insurance);
    assert_eq!(classify("Taxi aeropuerto"), IconTag::Transport);
    assert_eq!(classify("Arriendo"), IconTag::Housing);
    assert_eq!(classify("Servicios públicos"), IconTag::Utilities);
    assert_eq!(classify("Cuota tarjeta"), IconTag::Finance);
    assert_eq!(classify("Netflix"), IconTag::Entertainment);
    assert_eq!(classify("Plan celular"), IconTag::Phone);
    assert_eq!(classify("Gym"), IconTag::Health);
    assert_eq!(classify("Hijos"), IconTag::Family);
    assert_eq!(classify("Cumpleaños mamá"), IconTag::Gifts);
    assert_eq!(classify("Cuenta personal"), IconTag::Savings);
    assert_eq!(classify("Viaje a Cartagena"), IconTag::Travel);
}

#[test]
fn unknown_label_gets_default_tag() {
    assert_eq!(classify("xyz123"), IconTag::General);
    assert_eq!(classify(""), IconTag::General);
}

#[test]
fn accented_and_plain_spellings_agree() {
    assert_eq!(classify("Educación"), IconTag::Education);
    assert_eq!(classify("Educacion"), IconTag::Education);
    assert_eq!(classify("Teléfono"), IconTag::Phone);
    assert_eq!(classify("Médico"), IconTag::Health);
    assert_eq!(classify("Protección"), IconTag::Insurance);
}

#[test]
fn first_matching_rule_wins() {
    // "gasolina" contains "gas" but transport is checked before utilities
    assert_eq!(classify("Gasolina moto"), IconTag::Transport);
    assert_eq!(classify("Recibo gas"), IconTag::Utilities);
    // housing outranks savings
    assert_eq!(classify("Ahorro casa"), IconTag::Housing);
}

#[test]
fn builtin_table_order() {
    let c = Classifier::default();
    let tags: Vec<IconTag> = c.rules().iter().map(|r| r.tag).collect();
    assert_eq!(tags.len(), BUILTIN_RULES.len());
    assert_eq!(tags.first(), Some(&IconTag::Food));
    assert_eq!(tags.last(), Some(&IconTag::Insurance));
    assert!(!tags.contains(&IconTag::Income));
}

#[test]
fn income_rows_always_get_income_tag() {
    let c = Classifier::default();
    assert_eq!(
        c.classify_transaction(TransactionType::Income, "Mercado"),
        IconTag::Income
    );
    assert_eq!(
        c.classify_transaction(TransactionType::Income, "xyz"),
        IconTag::Income
    );
    assert_eq!(
        c.classify_transaction(TransactionType::Expense, "Mercado"),
        IconTag::Food
    );
    assert_eq!(
        c.classify_transaction(TransactionType::Saving, "Ahorro"),
        IconTag::Savings
    );
}

#[test]
fn extra_rules_take_priority() {
    let c = Classifier::with_extra_rules(&[Rule::new(IconTag::Travel, &["Mercado Libre"])]);
    assert_eq!(c.classify("Pedido mercado libre"), IconTag::Travel);
    assert_eq!(c.classify("Mercado"), IconTag::Food);
}

#[test]
fn custom_table_replaces_builtins() {
    let c = Classifier::new(vec![Rule::new(IconTag::Health, &["farmacia"])]);
    assert_eq!(c.classify("Farmacia"), IconTag::Health);
    assert_eq!(c.classify("Mercado"), IconTag::General);
}

#[test]
fn builtin_table_is_shared() {
    assert!(std::ptr::eq(Classifier::builtin(), Classifier::builtin()));
    assert_eq!(Classifier::builtin().rules(), Classifier::default().rules());
    for label in ["Mercado", "SOAT", "xyz", "Luz y agua"] {
        assert_eq!(classify(label), Classifier::builtin().classify(label));
    }
}

#[test]
fn classification_is_deterministic() {
    let c = Classifier::default();
    for label in ["Mercado", "SOAT", "xyz", "Luz y agua"] {
        assert_eq!(c.classify(label), c.classify(label));
    }
}

#[test]
fn tag_names() {
    assert_eq!(IconTag::Food.to_string(), "food");
    assert_eq!(
        serde_json::to_string(&IconTag::Insurance).unwrap(),
        "\"insurance\""
    );
}
