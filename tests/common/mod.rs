//! Support for the registry tests
//!
//! A [`Snapshot`] is a temporary directory laid out like the Bluetooth SIG's repository with a
//! small number of entries in each category.

#![allow(dead_code)]

use bluenumbers::{FetchError, Fetcher, UpdateStatus};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const PROTOCOL_IDENTIFIERS: &str = "\
uuids:
  - uuid: 0x0001
    name: SDP
  - uuid: 0x0002
    name: UDP
  - uuid: 0x0003
    name: RFCOMM
";

pub const SERVICE_UUIDS: &str = "\
uuids:
  - uuid: 0x1800
    name: GAP
    id: org.bluetooth.service.generic_access
  - uuid: 0x180F
    name: Battery
    id: org.bluetooth.service.battery_service
  - uuid: 0x180D
    name: Heart Rate
    id: org.bluetooth.service.heart_rate
";

pub const COMPANY_IDENTIFIERS: &str = "\
company_identifiers:
  - value: 0x004C
    name: 'Apple, Inc.'
  - value: 0x0006
    name: 'Microsoft'
  - value: 0x0059
    name: 'Nordic Semiconductor ASA'
";

pub const AD_TYPES: &str = "\
ad_types:
  - value: 0x01
    name: Flags
    reference: Core Specification Supplement, Part A, Section 1.3
  - value: 0x03
    name: Complete List of 16-bit Service or Service Class UUIDs
    reference: Core Specification Supplement, Part A, Section 1.1
  - value: 0x08
    name: Shortened Local Name
    reference: Core Specification Supplement, Part A, Section 1.2
  - value: 0x09
    name: Complete Local Name
    reference: Core Specification Supplement, Part A, Section 1.2
  - value: 0x16
    name: Service Data - 16-bit UUID
    reference: Core Specification Supplement, Part A, Section 1.11
  - value: 0xFF
    name: Manufacturer Specific Data
    reference: Core Specification Supplement, Part A, Section 1.4
";

pub struct Snapshot {
    dir: tempfile::TempDir,
}

impl Snapshot {
    pub fn new() -> Self {
        let snapshot = Snapshot {
            dir: tempfile::tempdir().expect("failed to create a temporary directory"),
        };

        snapshot.write("assigned_numbers/uuids/protocol_identifiers.yaml", PROTOCOL_IDENTIFIERS);
        snapshot.write("assigned_numbers/uuids/service_uuids.yaml", SERVICE_UUIDS);
        snapshot.write(
            "assigned_numbers/company_identifiers/company_identifiers.yaml",
            COMPANY_IDENTIFIERS,
        );
        snapshot.write("assigned_numbers/core/ad_types.yaml", AD_TYPES);

        snapshot
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write (or overwrite) a file relative to the root of the snapshot
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

/// A fetcher that counts how often it is used
///
/// Updates report `status` and run `on_update` first, which is used to change the snapshot the
/// way a pull would.
pub struct CountingFetcher {
    dir: PathBuf,
    status: UpdateStatus,
    pub ensured: Arc<AtomicUsize>,
    pub updated: Arc<AtomicUsize>,
    on_update: Box<dyn Fn(&Path) + Send + Sync>,
}

impl CountingFetcher {
    pub fn new(dir: &Path) -> Self {
        CountingFetcher {
            dir: dir.to_path_buf(),
            status: UpdateStatus::UpToDate,
            ensured: Arc::default(),
            updated: Arc::default(),
            on_update: Box::new(|_| ()),
        }
    }

    pub fn on_update<F>(mut self, status: UpdateStatus, f: F) -> Self
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        self.status = status;
        self.on_update = Box::new(f);
        self
    }
}

impl Fetcher for CountingFetcher {
    fn snapshot_dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_present(&self) -> Result<(), FetchError> {
        self.ensured.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn update(&self) -> Result<UpdateStatus, FetchError> {
        self.updated.fetch_add(1, Ordering::SeqCst);

        (self.on_update)(&self.dir);

        Ok(self.status)
    }
}

/// Check if a git program can be run
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
