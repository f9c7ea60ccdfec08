//! Categories listed as `value` and `name` pairs
//!
//! Company identifiers and AD types have the same layout, an assigned `value` with a `name` and
//! possibly other fields. They share the parsing routine and only differ by the width of the
//! value and how the record is made.

use super::{entries, read_list, AssignedNumber, Category};
use crate::error::ParseError;
use crate::records::{AdTypeInfo, CompanyIdentifier};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub type CompanyIdentifierTable = BTreeMap<u16, CompanyIdentifier>;

pub type AdTypeTable = BTreeMap<u8, AdTypeInfo>;

#[derive(Deserialize)]
struct ValueEntry {
    value: AssignedNumber,
    name: String,
    #[serde(default)]
    reference: Option<String>,
}

fn parse_values<K, R, F>(root: &Path, category: Category, make_record: F) -> Result<BTreeMap<K, R>, ParseError>
where
    K: TryFrom<u64> + Ord + Copy,
    F: Fn(K, ValueEntry) -> R,
{
    let path = root.join(category.relative_path());

    let list = read_list(category, &path)?;

    let mut table = BTreeMap::new();

    for entry in entries::<ValueEntry>(category, &path, list) {
        let Some(key) = entry.value.narrow::<K>() else {
            log::warn!(
                "skipping {} value {} ({}): out of range",
                category,
                entry.value,
                entry.name
            );

            continue;
        };

        table.insert(key, make_record(key, entry));
    }

    log::debug!("parsed {} {} from {}", table.len(), category, path.display());

    Ok(table)
}

/// Parse the company identifiers of the snapshot at `root`
pub fn parse_company_identifiers(root: &Path) -> Result<CompanyIdentifierTable, ParseError> {
    parse_values(root, Category::CompanyIdentifiers, |value, entry| CompanyIdentifier {
        value,
        name: entry.name,
    })
}

/// Parse the AD types of the snapshot at `root`
///
/// An AD type without a reference gets an empty reference.
pub fn parse_ad_types(root: &Path) -> Result<AdTypeTable, ParseError> {
    parse_values(root, Category::AdTypes, |value, entry| AdTypeInfo {
        value,
        name: entry.name,
        reference: entry.reference.unwrap_or_default(),
    })
}
