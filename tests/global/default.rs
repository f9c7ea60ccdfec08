//! The process wide registry
//!
//! The default registry is configured from the environment the first time it is used, so this
//! target has a single test that sets the environment before anything else runs.

#[path = "../common/mod.rs"]
mod common;

use bluenumbers::config::{DIR_ENV, GIT_ENV};
use bluenumbers::{Category, Error, FetchError};
use common::Snapshot;

#[test]
fn default_registry_from_environment() {
    let snapshot = Snapshot::new();
    let tools = tempfile::tempdir().unwrap();

    std::env::set_var(DIR_ENV, snapshot.path());
    std::env::set_var(GIT_ENV, tools.path().join("no-such-git"));

    assert_eq!(snapshot.path(), bluenumbers::registry().snapshot_dir());

    // an existing snapshot is read without running git
    assert_eq!("UDP", bluenumbers::get_uuid(0x0002).unwrap().unwrap().name);

    assert_eq!(
        0x180F,
        bluenumbers::get_uuid_by_id("org.bluetooth.service.battery_service")
            .unwrap()
            .unwrap()
            .short_uuid
    );

    assert_eq!(
        "Nordic Semiconductor ASA",
        bluenumbers::get_company_identifier(0x0059).unwrap().unwrap().name
    );

    assert_eq!("Flags", bluenumbers::get_ad_type(0x01).unwrap().unwrap().name);
    assert_eq!(None, bluenumbers::get_ad_type(0x13).unwrap());

    assert!(bluenumbers::registry().is_loaded(Category::AdTypes));

    // updating needs git, a failed update keeps the loaded tables
    assert!(matches!(
        bluenumbers::update(),
        Err(Error::Fetch(FetchError::GitUnavailable { .. }))
    ));

    assert!(bluenumbers::registry().is_loaded(Category::AdTypes));
}
