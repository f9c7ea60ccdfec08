use super::{entries, read_list, AssignedNumber, Category};
use crate::error::{ParseError, ParseErrorKind};
use crate::records::AssignedUuid;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct UuidEntry {
    uuid: AssignedNumber,
    name: String,
    #[serde(default)]
    id: Option<String>,
}

/// The table of assigned UUIDs
///
/// Along with the table keyed by the short UUID, there is an index of the UUIDs by their
/// identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UuidTable {
    by_uuid: BTreeMap<u16, AssignedUuid>,
    by_id: BTreeMap<String, u16>,
}

impl UuidTable {
    pub fn get(&self, short_uuid: u16) -> Option<&AssignedUuid> {
        self.by_uuid.get(&short_uuid)
    }

    /// Get a UUID by its identifier (for example `org.bluetooth.service.battery_service`)
    pub fn get_by_id(&self, id: &str) -> Option<&AssignedUuid> {
        self.by_id.get(id).and_then(|short_uuid| self.by_uuid.get(short_uuid))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignedUuid> + '_ {
        self.by_uuid.values()
    }

    /// The table keyed by the short UUID
    pub fn as_map(&self) -> &BTreeMap<u16, AssignedUuid> {
        &self.by_uuid
    }

    pub fn len(&self) -> usize {
        self.by_uuid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uuid.is_empty()
    }

    fn insert(&mut self, uuid: AssignedUuid) {
        if let Some(replaced) = self.by_uuid.remove(&uuid.short_uuid) {
            log::debug!(
                "UUID {:#06x} of {} is replaced by {} of {}",
                replaced.short_uuid,
                replaced.category,
                uuid.name,
                uuid.category
            );

            if let Some(id) = replaced.id {
                if self.by_id.get(&id) == Some(&replaced.short_uuid) {
                    self.by_id.remove(&id);

                    // another UUID may still carry the identifier
                    if let Some(other) = self.by_uuid.values().find(|other| other.id.as_ref() == Some(&id)) {
                        self.by_id.insert(id, other.short_uuid);
                    }
                }
            }
        }

        if let Some(id) = uuid.id.as_ref() {
            self.by_id.insert(id.clone(), uuid.short_uuid);
        }

        self.by_uuid.insert(uuid.short_uuid, uuid);
    }
}

impl FromIterator<AssignedUuid> for UuidTable {
    fn from_iter<I: IntoIterator<Item = AssignedUuid>>(iter: I) -> Self {
        let mut table = UuidTable::default();

        iter.into_iter().for_each(|uuid| table.insert(uuid));

        table
    }
}

/// Parse every UUID file of the snapshot at `root`
///
/// The files are read in the order of their names, so when the same UUID is within more than one
/// file the one of the last file wins.
pub fn parse_uuids(root: &Path) -> Result<UuidTable, ParseError> {
    let category = Category::Uuids;
    let dir = root.join(category.relative_path());

    let mut files = std::fs::read_dir(&dir)
        .and_then(|read_dir| {
            read_dir
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<Result<Vec<PathBuf>, _>>()
        })
        .map_err(|e| ParseError::new(category, &dir, e))?;

    files.retain(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "yaml"));

    if files.is_empty() {
        return Err(ParseError::new(category, dir, ParseErrorKind::NoFiles));
    }

    files.sort();

    let mut table = UuidTable::default();

    for path in files.iter() {
        let Some(file_category) = path.file_stem().and_then(|stem| stem.to_str()) else {
            log::warn!("skipping UUID file with a non UTF-8 name: {}", path.display());

            continue;
        };

        let list = read_list(category, path)?;

        for entry in entries::<UuidEntry>(category, path, list) {
            let Some(short_uuid) = entry.uuid.narrow::<u16>() else {
                log::warn!(
                    "skipping UUID {} ({}) of {}: not a 16 bit UUID",
                    entry.uuid,
                    entry.name,
                    path.display()
                );

                continue;
            };

            table.insert(AssignedUuid {
                short_uuid,
                name: entry.name,
                id: entry.id,
                category: file_category.to_string(),
            });
        }
    }

    log::debug!("parsed {} UUIDs from {} files", table.len(), files.len());

    Ok(table)
}
