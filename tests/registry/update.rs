//! Updating the snapshot of a registry

#[path = "../common/mod.rs"]
mod common;

use bluenumbers::{Category, Registry, UpdateStatus};
use common::{CountingFetcher, Snapshot};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn update_invalidates_every_table() {
    let snapshot = Snapshot::new();
    let fetcher = CountingFetcher::new(snapshot.path());
    let ensured = fetcher.ensured.clone();
    let updated = fetcher.updated.clone();

    let registry = Registry::new(fetcher);

    for category in Category::ALL {
        registry.load(category).unwrap();
    }

    assert_eq!(3, ensured.load(Ordering::SeqCst));

    assert_eq!(UpdateStatus::UpToDate, registry.update().unwrap());
    assert_eq!(1, updated.load(Ordering::SeqCst));

    for category in Category::ALL {
        assert!(!registry.is_loaded(category));
    }

    // the next lookup loads the table again
    registry.get_uuid(0x0002).unwrap();

    assert_eq!(4, ensured.load(Ordering::SeqCst));
    assert!(registry.is_loaded(Category::Uuids));
}

#[test]
fn lookup_after_update_reads_new_revision() {
    let snapshot = Snapshot::new();

    let fetcher = CountingFetcher::new(snapshot.path()).on_update(UpdateStatus::Updated, |root| {
        std::fs::write(
            root.join("assigned_numbers/company_identifiers/company_identifiers.yaml"),
            "company_identifiers:\n  - value: 0x004C\n    name: 'Apple Inc.'\n",
        )
        .unwrap();
    });

    let registry = Registry::new(fetcher);

    assert_eq!(
        "Apple, Inc.",
        registry.get_company_identifier(0x004C).unwrap().unwrap().name
    );

    let status = registry.update().unwrap();

    assert!(status.changed());

    assert_eq!(
        "Apple Inc.",
        registry.get_company_identifier(0x004C).unwrap().unwrap().name
    );

    assert_eq!(None, registry.get_company_identifier(0x0006).unwrap());
}

#[test]
fn tables_held_across_an_update_are_unchanged() {
    let snapshot = Snapshot::new();

    let fetcher = CountingFetcher::new(snapshot.path()).on_update(UpdateStatus::Updated, |root| {
        std::fs::write(root.join("assigned_numbers/core/ad_types.yaml"), "ad_types: []\n").unwrap();
    });

    let registry = Registry::new(fetcher);

    let before = registry.ad_types().unwrap();

    registry.update().unwrap();

    let after = registry.ad_types().unwrap();

    assert!(!before.is_empty());
    assert!(after.is_empty());
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn local_snapshot_update_is_a_no_op() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    registry.get_ad_type(0x01).unwrap();

    let status = registry.update().unwrap();

    assert_eq!(UpdateStatus::UpToDate, status);
    assert!(!registry.is_loaded(Category::AdTypes));
    assert_eq!(None, registry.revision().unwrap());
}

#[test]
fn concurrent_updates() {
    let snapshot = Snapshot::new();
    let fetcher = CountingFetcher::new(snapshot.path());
    let updated = fetcher.updated.clone();

    let registry = Arc::new(Registry::new(fetcher));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();

            std::thread::spawn(move || {
                registry.update().unwrap();

                registry.get_ad_type(0x09).unwrap().unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!("Complete Local Name", handle.join().unwrap().name);
    }

    assert_eq!(4, updated.load(Ordering::SeqCst));
}
