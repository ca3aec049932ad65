//! Alert store persistence and trigger evaluation.

use aurex::services::alerts::{should_trigger, AlertStore};
use aurex::types::{Alert, AlertKind, ChangeDirection};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "aurex_alerts_{}_{}.json",
        name,
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn test_store_survives_reload() {
    let path = temp_path("reload");

    let mut store = AlertStore::load(&path);
    let created = store.add("AAPL", AlertKind::PriceAbove, 150.0, None).unwrap();
    drop(store);

    let reloaded = AlertStore::load(&path);
    assert_eq!(reloaded.all().len(), 1);
    assert_eq!(reloaded.all()[0], created);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_ids_stay_monotonic_across_reload() {
    let path = temp_path("monotonic");

    let mut store = AlertStore::load(&path);
    store.add("AAPL", AlertKind::PriceAbove, 150.0, None).unwrap();
    store.add("MSFT", AlertKind::PriceBelow, 300.0, None).unwrap();
    assert!(store.remove(1).unwrap());
    drop(store);

    let mut reloaded = AlertStore::load(&path);
    let next = reloaded.add("TSLA", AlertKind::PriceAbove, 200.0, None).unwrap();
    assert_eq!(next.id, 3);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_price_above_trigger_sequence() {
    let path = temp_path("sequence");
    let mut store = AlertStore::load(&path);
    let alert = store.add("AAPL", AlertKind::PriceAbove, 100.0, None).unwrap();

    // Quotes below or at the threshold leave the alert untouched.
    for price in [98.0, 99.0, 100.0] {
        assert!(!should_trigger(&alert, price, None));
    }

    assert!(should_trigger(&alert, 101.0, None));
    let triggered = store.mark_triggered(alert.id, 101.0).unwrap();
    assert!(triggered.triggered);
    assert_eq!(triggered.triggered_price, Some(101.0));
    assert!(triggered.triggered_at.is_some());

    // Terminal state: later quotes never re-fire it.
    assert!(!store.all()[0].is_active());
    assert!(store.mark_triggered(alert.id, 120.0).is_none());

    let _ = fs::remove_file(&path);
}

#[test]
fn test_percent_change_needs_previous_close() {
    let alert = Alert {
        id: 1,
        symbol: "TSLA".to_string(),
        kind: AlertKind::PercentChange,
        threshold: 5.0,
        condition: Some(ChangeDirection::Increase),
        created: "2026-01-01 00:00:00".to_string(),
        triggered: false,
        triggered_at: None,
        triggered_price: None,
    };

    assert!(!should_trigger(&alert, 500.0, None));
    assert!(should_trigger(&alert, 106.0, Some(100.0)));
    assert!(!should_trigger(&alert, 104.9, Some(100.0)));
}

#[test]
fn test_persisted_schema_uses_type_key() {
    let path = temp_path("schema");
    let mut store = AlertStore::load(&path);
    store.add("AAPL", AlertKind::PriceAbove, 150.0, None).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["type"], "price_above");
    assert_eq!(value[0]["symbol"], "AAPL");
    assert_eq!(value[0]["triggered"], false);
    assert!(value[0].get("triggered_at").is_none());

    let _ = fs::remove_file(&path);
}
