//! Tests for catalog parsing and ingestion validation.

use super::*;
use chrono::TimeZone;

// ===== Accepted shapes =====

#[test]
fn parses_bare_store_array() {
    let json = r#"[
        {"name": "Alpha", "offers": [
            {"platform_id": 1, "platform_name": "Cuponomia", "value": 2.5, "value_specific": 3.0},
            {"platform_id": 2, "platform_name": "Méliuz", "value": 4.0}
        ]},
        {"name": "Beta", "offers": []}
    ]"#;

    let catalog = parse_catalog(json).unwrap();

    assert_eq!(catalog.stores.len(), 2);
    let alpha = &catalog.stores[0];
    assert_eq!(alpha.name.as_str(), "Alpha");
    assert_eq!(alpha.offers.len(), 2);
    assert_eq!(alpha.offers[0].platform_id, PlatformId::new(1));
    assert_eq!(alpha.offers[0].value_specific, Some(3.0));
    assert_eq!(alpha.offers[1].value_specific, None);
    assert!(catalog.synced_at.is_none());
}

#[test]
fn parses_wrapped_catalog_with_platforms_and_sync_time() {
    let json = r#"{
        "synced_at": "2025-03-07 14:05:00",
        "platforms": [{"id": 2, "name": "Méliuz"}, {"id": 1, "name": "Cuponomia"}],
        "stores": [{"store_id": 10, "store_name": "Alpha", "store_url": "https://alpha.example"}]
    }"#;

    let catalog = parse_catalog(json).unwrap();

    assert_eq!(
        catalog.synced_at,
        Some(Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap())
    );
    let names: Vec<_> = catalog.platforms.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cuponomia", "Méliuz"]);

    let alpha = &catalog.stores[0];
    assert_eq!(alpha.id, Some(10));
    assert_eq!(alpha.url.as_deref(), Some("https://alpha.example"));
    assert!(alpha.offers.is_empty());
}

#[test]
fn negative_fractional_unix_time_keeps_millis() {
    let json = r#"{"synced_at": -0.5, "stores": []}"#;
    let catalog = parse_catalog(json).unwrap();
    assert_eq!(catalog.synced_at.map(|t| t.timestamp_millis()), Some(-500));
}

#[test]
fn unix_sync_time_is_accepted() {
    let json = r#"{"synced_at": 1741356300.5, "stores": []}"#;
    let catalog = parse_catalog(json).unwrap();
    assert_eq!(
        catalog.synced_at.map(|t| t.timestamp()),
        Some(1_741_356_300)
    );
}

#[test]
fn unparsable_sync_time_is_dropped() {
    let json = r#"{"synced_at": "yesterday", "stores": []}"#;
    let catalog = parse_catalog(json).unwrap();
    assert!(catalog.synced_at.is_none());
}

#[test]
fn null_offers_and_null_specific_are_absent() {
    let json = r#"[{"name": "Beta", "offers": null},
                   {"name": "Gamma", "offers": [{"platform_id": 1, "value": 1.0, "value_specific": null}]}]"#;
    let catalog = parse_catalog(json).unwrap();

    assert!(catalog.stores[0].offers.is_empty());
    assert_eq!(catalog.stores[1].offers[0].value_specific, None);
    assert_eq!(catalog.stores[1].offers[0].platform_name, "");
}

#[test]
fn string_platform_id_is_parsed_as_integer() {
    let json = r#"[{"name": "Alpha", "offers": [{"platform_id": " 7 ", "value": 1.0}]}]"#;
    let catalog = parse_catalog(json).unwrap();
    assert_eq!(catalog.stores[0].offers[0].platform_id, PlatformId::new(7));
}

#[test]
fn unknown_fields_are_ignored() {
    let json = r#"[{"name": "Alpha", "max_cashback": 4.0, "offers": [
        {"platform_id": 1, "value": 4.0, "logo": "alpha.png"}
    ]}]"#;
    assert!(parse_catalog(json).is_ok());
}

#[test]
fn integral_float_platform_ids_are_accepted() {
    let json = r#"[{"name": "Alpha", "offers": [
        {"platform_id": 1.0, "value": 1.0},
        {"platform_id": "2.0", "value": 1.0}
    ]}]"#;
    let catalog = parse_catalog(json).unwrap();
    let ids: Vec<_> = catalog.stores[0].offers.iter().map(|o| o.platform_id.get()).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn fractional_platform_id_is_rejected() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"platform_id": 1.5, "value": 1.0}]}]"#)
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidPlatformId {
            store: "Alpha".to_string(),
            record: Record::Offer(0),
            raw: "1.5".to_string()
        }
    );
}

#[test]
fn offer_details_are_kept() {
    let json = r#"[{"name": "Alpha", "offers": [{
        "platform_id": 1, "value": 4.0,
        "description": "até 4% em eletrônicos",
        "date_end": "2025-03-31 23:59:59",
        "partnership_url": "https://cuponomia.example/alpha"
    }]}]"#;

    let offer = &parse_catalog(json).unwrap().stores[0].offers[0];
    assert_eq!(offer.description.as_deref(), Some("até 4% em eletrônicos"));
    assert_eq!(
        offer.date_end,
        Some(Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap())
    );
    assert_eq!(offer.url.as_deref(), Some("https://cuponomia.example/alpha"));
}

#[test]
fn history_is_parsed_and_sorted_by_start() {
    let json = r#"[{"name": "Alpha", "history": [
        {"platform_id": 1, "value": 3.0, "date_start": "2025-02-01 00:00:00", "date_end": "2025-02-10 00:00:00"},
        {"platform_id": 2, "value": 5.0, "date_start": "2025-01-05"},
        {"platform_id": 1, "value": 1.0}
    ]}]"#;

    let store = &parse_catalog(json).unwrap().stores[0];
    let values: Vec<f64> = store.history.iter().map(|h| h.value).collect();
    assert_eq!(values, [1.0, 5.0, 3.0]);
    assert!(store.history[0].date_start.is_none());
    assert_eq!(
        store.history[2].date_end,
        Some(Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap())
    );
    assert!(store.offers.is_empty());
}

#[test]
fn invalid_history_entry_is_named() {
    let json = r#"[{"name": "Alpha", "history": [{"platform_id": 1, "value": 1.0}, {"value": 2.0}]}]"#;
    let err = parse_catalog(json).unwrap_err();
    assert_eq!(
        err,
        CatalogError::MissingPlatformId {
            store: "Alpha".to_string(),
            record: Record::History(1)
        }
    );
}

// ===== Derived platforms =====

#[test]
fn platforms_are_derived_from_offers_sorted_by_name() {
    let json = r#"[
        {"name": "Alpha", "offers": [
            {"platform_id": 2, "platform_name": "Méliuz", "value": 4.0},
            {"platform_id": 1, "platform_name": "Cuponomia", "value": 2.5}
        ]},
        {"name": "Beta", "offers": [{"platform_id": 2, "platform_name": "Méliuz", "value": 1.0}]}
    ]"#;

    let catalog = parse_catalog(json).unwrap();
    let platforms: Vec<_> = catalog
        .platforms
        .iter()
        .map(|p| (p.id.get(), p.name.as_str()))
        .collect();
    assert_eq!(platforms, [(1, "Cuponomia"), (2, "Méliuz")]);
}

#[test]
fn derived_platform_prefers_first_non_empty_name() {
    let json = r#"[{"name": "Alpha", "offers": [
        {"platform_id": 5, "value": 1.0},
        {"platform_id": 5, "platform_name": "Inter", "value": 2.0}
    ]}]"#;

    let catalog = parse_catalog(json).unwrap();
    assert_eq!(catalog.platforms.len(), 1);
    assert_eq!(catalog.platforms[0].name, "Inter");
}

// ===== Rejected input =====

#[test]
fn invalid_json_is_rejected() {
    let err = parse_catalog("[{").unwrap_err();
    assert!(matches!(err, CatalogError::Json { .. }));
}

#[test]
fn wrong_type_reports_its_line() {
    let json = "[{\"name\": \"Alpha\"},\n {\"name\": 5}]";
    match parse_catalog(json).unwrap_err() {
        CatalogError::Json { line, column, .. } => {
            assert_eq!(line, 2);
            assert!(column > 0);
        }
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[test]
fn wrapped_payload_type_error_is_positioned() {
    let json = "{\n  \"stores\": [\n    {\"name\": \"Alpha\", \"offers\": [{\"platform_id\": 1, \"value\": 1, \"description\": 3}]}\n  ]\n}";
    match parse_catalog(json).unwrap_err() {
        CatalogError::Json { line, .. } => assert_eq!(line, 3),
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[test]
fn string_value_is_rejected_with_context() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"platform_id": 1, "value": "4.0"}]}]"#)
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidValueType {
            store: "Alpha".to_string(),
            record: Record::Offer(0),
            field: "value",
            raw: "\"4.0\"".to_string()
        }
    );
    assert!(err.to_string().contains("Store 'Alpha' offer #0"));
}

#[test]
fn non_integer_platform_list_id_is_rejected() {
    let json = r#"{"platforms": [{"id": 1, "name": "Cuponomia"}, {"id": "x"}], "stores": []}"#;
    let err = parse_catalog(json).unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidPlatformListId {
            index: 1,
            raw: "x".to_string()
        }
    );
}

#[test]
fn missing_store_name_is_rejected() {
    let err = parse_catalog(r#"[{"name": "Alpha"}, {"offers": []}]"#).unwrap_err();
    assert_eq!(err, CatalogError::InvalidStoreName { store: 1 });
}

#[test]
fn blank_store_name_is_rejected() {
    let err = parse_catalog(r#"[{"name": "   "}]"#).unwrap_err();
    assert_eq!(err, CatalogError::InvalidStoreName { store: 0 });
}

#[test]
fn missing_value_is_rejected_at_ingestion() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"platform_id": 1}]}]"#).unwrap_err();
    assert_eq!(
        err,
        CatalogError::MissingValue {
            store: "Alpha".to_string(),
            record: Record::Offer(0)
        }
    );
}

#[test]
fn negative_value_is_rejected() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"platform_id": 1, "value": -2}]}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidValue { field: "value", .. }
    ));
}

#[test]
fn negative_specific_value_is_rejected() {
    let err = parse_catalog(
        r#"[{"name": "Alpha", "offers": [{"platform_id": 1, "value": 2, "value_specific": -1}]}]"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidValue {
            field: "value_specific",
            ..
        }
    ));
}

#[test]
fn missing_platform_id_is_rejected() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"value": 1.0}]}]"#).unwrap_err();
    assert!(matches!(err, CatalogError::MissingPlatformId { record: Record::Offer(0), .. }));
}

#[test]
fn non_numeric_platform_id_is_rejected() {
    let err = parse_catalog(r#"[{"name": "Alpha", "offers": [{"platform_id": "abc", "value": 1.0}]}]"#)
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidPlatformId {
            store: "Alpha".to_string(),
            record: Record::Offer(0),
            raw: "abc".to_string()
        }
    );
}
