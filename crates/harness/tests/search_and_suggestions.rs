use std::collections::HashSet;

use inventory_core::{CatalogConfig, Field, FieldState};
use inventory_engine::CatalogEvent;
use inventory_harness::{TestCatalog, seed};
use inventory_storage::SqliteStore;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const HARDWARE: &[(&str, &str, u32)] = &[
    ("Bolt", "Hardware", 5),
    ("Nail", "Hardware", 120),
    ("Pen", "Office", 12),
];

// ============================================================================
// Filtered view
// ============================================================================

#[test]
fn search_by_category_then_clear() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    assert_eq!(t.filtered_names(), ["Bolt", "Nail", "Pen"]);

    t.catalog.set_search_query("hard");
    assert_eq!(t.filtered_names(), ["Bolt", "Nail"]);

    t.catalog.clear_search();
    assert_eq!(t.catalog.search_query(), "");
    assert_eq!(t.filtered_names(), ["Bolt", "Nail", "Pen"]);
    Ok(())
}

#[test]
fn search_trims_and_ignores_case() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_search_query("  NAI ");
    assert_eq!(t.filtered_names(), ["Nail"]);

    t.catalog.set_search_query("   ");
    assert_eq!(t.filtered_names(), ["Bolt", "Nail", "Pen"]);
    Ok(())
}

#[test]
fn added_product_appears_only_when_matching() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_search_query("office");

    t.fill("Stapler", "Office", "4");
    assert!(t.catalog.add().is_applied());
    t.fill("Screw", "Hardware", "50");
    assert!(t.catalog.add().is_applied());

    assert_eq!(t.filtered_names(), ["Pen", "Stapler"]);
    assert_eq!(t.names(), ["Bolt", "Nail", "Pen", "Stapler", "Screw"]);
    Ok(())
}

#[test]
fn query_change_is_announced() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_search_query("pen");
    t.catalog.clear_search();
    assert_eq!(t.events.count(&CatalogEvent::QueryChanged), 2);
    Ok(())
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn suggestions_follow_the_name_draft() -> TestResult {
    let mut t = TestCatalog::seeded(&[
        ("Bolt", "Hardware", 5),
        ("Bolt Cutter", "Tools", 1),
        ("Pen", "Office", 12),
    ])?;

    t.catalog.set_name("bo");
    assert!(t.catalog.suggestions_open());
    assert_eq!(t.catalog.suggestions(), ["Bolt", "Bolt Cutter"]);

    t.catalog.set_name("Bolt C");
    assert_eq!(t.catalog.suggestions(), ["Bolt Cutter"]);

    t.catalog.set_name("");
    assert!(!t.catalog.suggestions_open());
    assert!(t.catalog.suggestions().is_empty());
    Ok(())
}

#[test]
fn panel_opens_even_without_matches() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_name("Zebra");
    assert!(t.catalog.suggestions_open());
    assert!(t.catalog.suggestions().is_empty());

    t.catalog.set_name("   ");
    assert!(!t.catalog.suggestions_open());
    Ok(())
}

#[test]
fn suggestions_never_exceed_ten() -> TestResult {
    let rows: Vec<(String, u32)> = (0..15).map(|i| (format!("Item {i:02}"), i)).collect();
    let rows: Vec<(&str, &str, u32)> = rows
        .iter()
        .map(|(name, qty)| (name.as_str(), "Bulk", *qty))
        .collect();
    let mut t = TestCatalog::seeded(&rows)?;

    t.catalog.set_name("Item");
    assert_eq!(t.catalog.suggestions().len(), 10);

    let unique: HashSet<&String> = t.catalog.suggestions().iter().collect();
    assert_eq!(unique.len(), 10);
    Ok(())
}

#[test]
fn configured_limit_caps_suggestions() -> TestResult {
    let store = seed(
        SqliteStore::open_in_memory()?,
        &[("Bolt", "Hardware", 1), ("Bolt Cutter", "Tools", 1), ("Bolster", "Misc", 1)],
    )?;
    let config = CatalogConfig::from_toml_str("suggestion_limit = 2")?;
    let mut t = TestCatalog::with_store(store, config)?;

    t.catalog.set_name("Bol");
    assert_eq!(t.catalog.suggestions().len(), 2);
    Ok(())
}

#[test]
fn failed_lookup_leaves_panel_open_and_empty() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.faults().set_failing_reads(true);

    t.catalog.set_name("Bo");
    assert!(t.catalog.suggestions_open());
    assert!(t.catalog.suggestions().is_empty());
    assert!(t.notices.is_empty());
    Ok(())
}

#[test]
fn accepting_a_suggestion_populates_and_hides() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_name("Na");
    assert_eq!(t.catalog.suggestions(), ["Nail"]);

    assert!(t.catalog.accept_suggestion(0));
    assert!(!t.catalog.suggestions_open());
    assert_eq!(t.catalog.draft().text(Field::Name), "Nail");
    assert_eq!(t.catalog.draft().text(Field::Category), "Hardware");
    assert_eq!(t.catalog.draft().text(Field::Quantity), "120");

    assert!(!t.catalog.accept_suggestion(5));
    Ok(())
}

// ============================================================================
// Selection & auto-populate
// ============================================================================

#[test]
fn selecting_copies_fields_and_hides_panel() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_name("P");
    assert!(t.catalog.suggestions_open());

    let pen = t.id_of("Pen").expect("pen");
    t.catalog.select(Some(pen));

    let draft = t.catalog.draft();
    assert_eq!(draft.state(Field::Name), &FieldState::Populated("Pen".into()));
    assert_eq!(draft.state(Field::Category), &FieldState::Populated("Office".into()));
    assert_eq!(draft.state(Field::Quantity), &FieldState::Populated("12".into()));
    assert!(!t.catalog.suggestions_open());
    assert_eq!(t.catalog.selection().map(|p| p.id), Some(pen));
    assert_eq!(t.events.count(&CatalogEvent::SelectionChanged(Some(pen))), 1);
    Ok(())
}

#[test]
fn selecting_unknown_id_clears_selection() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    assert!(t.select_named("Bolt"));
    t.catalog.select(Some(inventory_core::ProductId::new()));
    assert!(t.catalog.selection().is_none());
    assert_eq!(t.catalog.draft().text(Field::Name), "Bolt");
    Ok(())
}

#[test]
fn exact_name_populates_category_and_quantity() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_name("Bol");
    assert_eq!(t.catalog.draft().text(Field::Category), "");

    t.catalog.set_name("Bolt");
    assert_eq!(
        t.catalog.draft().state(Field::Category),
        &FieldState::Populated("Hardware".into())
    );
    assert_eq!(t.catalog.draft().text(Field::Quantity), "5");
    assert!(t.events.count(&CatalogEvent::DraftChanged(Field::Quantity)) >= 1);
    Ok(())
}

#[test]
fn exact_match_is_case_sensitive() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_name("bolt");
    assert!(!t.catalog.draft().is_activated(Field::Category));
    Ok(())
}

#[test]
fn operator_edits_block_auto_populate() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_category("Fasteners");
    t.catalog.set_name("Bolt");

    assert_eq!(t.catalog.draft().text(Field::Category), "Fasteners");
    assert!(!t.catalog.draft().is_activated(Field::Quantity));
    Ok(())
}

#[test]
fn blank_operator_edits_do_not_block_auto_populate() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    t.catalog.set_quantity("  ");
    t.catalog.set_name("Nail");

    assert_eq!(t.catalog.draft().text(Field::Category), "Hardware");
    assert_eq!(t.catalog.draft().text(Field::Quantity), "120");
    Ok(())
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn errors_appear_only_after_activation() -> TestResult {
    let mut t = TestCatalog::new()?;
    for field in Field::ALL {
        assert_eq!(t.catalog.field_error(field), None);
    }

    t.catalog.set_name("ab");
    assert!(t.catalog.field_error(Field::Name).is_some());
    assert_eq!(t.catalog.field_error(Field::Category), None);

    t.catalog.set_name("abc");
    assert_eq!(t.catalog.field_error(Field::Name), None);

    t.catalog.set_quantity("-3");
    assert_eq!(
        t.catalog.field_error(Field::Quantity).map(|e| e.to_string()),
        Some("Quantity must be a non-negative number.".to_string())
    );
    Ok(())
}

#[test]
fn unsubscribed_observer_stops_receiving() -> TestResult {
    let mut t = TestCatalog::seeded(HARDWARE)?;
    let extra = inventory_harness::EventLog::new();
    let id = t.catalog.subscribe(extra.observer());

    t.catalog.set_search_query("pen");
    assert!(t.catalog.unsubscribe(id));
    t.catalog.set_search_query("nail");

    assert_eq!(extra.events(), [CatalogEvent::QueryChanged]);
    assert_eq!(t.events.count(&CatalogEvent::QueryChanged), 2);
    Ok(())
}
