//! Lookups of a registry over a local snapshot

#[path = "../common/mod.rs"]
mod common;

use bluenumbers::{AdTypeInfo, AssignedUuid, Category, CompanyIdentifier, Registry};
use common::Snapshot;

#[test]
fn uuid_by_short_value() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    assert_eq!(
        Some(AssignedUuid {
            short_uuid: 2,
            name: "UDP".to_string(),
            id: None,
            category: "protocol_identifiers".to_string(),
        }),
        registry.get_uuid(0x0002).unwrap()
    );
}

#[test]
fn uuid_by_id() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let battery = registry
        .get_uuid_by_id("org.bluetooth.service.battery_service")
        .unwrap()
        .unwrap();

    assert_eq!(0x180F, battery.short_uuid);
    assert_eq!("service_uuids", battery.category);
    assert_eq!(
        "0000180f-0000-1000-8000-00805f9b34fb",
        battery.full_uuid().to_string()
    );

    assert_eq!(None, registry.get_uuid_by_id("org.bluetooth.service.unknown").unwrap());
}

#[test]
fn company_identifier() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    assert_eq!(
        Some(CompanyIdentifier {
            value: 76,
            name: "Apple, Inc.".to_string(),
        }),
        registry.get_company_identifier(0x004C).unwrap()
    );
}

#[test]
fn ad_type() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    assert_eq!(
        Some(AdTypeInfo {
            value: 9,
            name: "Complete Local Name".to_string(),
            reference: "Core Specification Supplement, Part A, Section 1.2".to_string(),
        }),
        registry.get_ad_type(0x09).unwrap()
    );
}

#[test]
fn every_key_finds_its_record() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let uuids = registry.uuids().unwrap();

    for (short_uuid, uuid) in uuids.as_map() {
        assert_eq!(*short_uuid, uuid.short_uuid);
        assert_eq!(Some(uuid.clone()), registry.get_uuid(*short_uuid).unwrap());
    }

    for (value, company) in registry.company_identifiers().unwrap().iter() {
        assert_eq!(*value, company.value);
    }

    for (value, ad_type) in registry.ad_types().unwrap().iter() {
        assert_eq!(*value, ad_type.value);
    }
}

#[test]
fn missing_keys_are_not_errors() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    assert_eq!(None, registry.get_uuid(0xFFFF).unwrap());
    assert_eq!(None, registry.get_company_identifier(0xFFFF).unwrap());
    assert_eq!(None, registry.get_ad_type(0x7F).unwrap());
}

#[test]
fn lookups_are_idempotent() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let first = registry.get_uuid(0x180D).unwrap();

    // changing the files does not matter to a loaded table
    snapshot.write("assigned_numbers/uuids/service_uuids.yaml", "uuids: []\n");

    assert_eq!(first, registry.get_uuid(0x180D).unwrap());
    assert!(first.is_some());
}

#[test]
fn parsing_is_deterministic() {
    let snapshot = Snapshot::new();

    let first = Registry::local(snapshot.path());
    let second = Registry::local(snapshot.path());

    assert_eq!(*first.uuids().unwrap(), *second.uuids().unwrap());
    assert_eq!(
        *first.company_identifiers().unwrap(),
        *second.company_identifiers().unwrap()
    );
    assert_eq!(*first.ad_types().unwrap(), *second.ad_types().unwrap());
}

#[test]
fn categories_load_independently() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    registry.get_ad_type(0x01).unwrap();

    assert!(registry.is_loaded(Category::AdTypes));
    assert!(!registry.is_loaded(Category::Uuids));
    assert!(!registry.is_loaded(Category::CompanyIdentifiers));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let snapshot = Snapshot::new();

    snapshot.write("assigned_numbers/core/ad_types.yaml", "ad_types: {\n");

    let registry = Registry::local(snapshot.path());

    match registry.get_ad_type(0x01) {
        Err(bluenumbers::Error::Parse(error)) => {
            assert_eq!(Category::AdTypes, error.category);
            assert!(error.path.ends_with("ad_types.yaml"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }

    assert!(!registry.is_loaded(Category::AdTypes));

    // the other categories are unaffected
    assert!(registry.get_company_identifier(0x004C).unwrap().is_some());

    // fixing the file makes the next lookup succeed
    snapshot.write("assigned_numbers/core/ad_types.yaml", common::AD_TYPES);

    assert!(registry.get_ad_type(0x01).unwrap().is_some());
}

#[test]
fn export_json() {
    let snapshot = Snapshot::new();
    let out = tempfile::tempdir().unwrap();
    let registry = Registry::local(snapshot.path());

    registry.export_json(out.path()).unwrap();

    let uuids: std::collections::BTreeMap<String, AssignedUuid> =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("uuids.json")).unwrap()).unwrap();

    assert_eq!(6, uuids.len());
    assert_eq!("UDP", uuids["2"].name);

    let companies: std::collections::BTreeMap<String, CompanyIdentifier> = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("company_identifiers.json")).unwrap(),
    )
    .unwrap();

    assert_eq!("Apple, Inc.", companies["76"].name);
}
