//! Parsers of the registry files
//!
//! Each [`Category`] of the registry has its own file (or directory of files) within the
//! snapshot. Every file is a YAML mapping with a single top level list, and every entry of that
//! list becomes one record.
//!
//! Parsing is best effort. An entry that is missing a required field, or whose key does not fit
//! the width of the category's key, is skipped with a warning. Only a file that cannot be read or
//! interpreted at all is an error.

mod uuids;
mod values;

use crate::error::{ParseError, ParseErrorKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use uuids::{parse_uuids, UuidTable};
pub use values::{parse_ad_types, parse_company_identifiers, AdTypeTable, CompanyIdentifierTable};

/// A category of the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Uuids,
    CompanyIdentifiers,
    AdTypes,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Uuids, Category::CompanyIdentifiers, Category::AdTypes];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Uuids => "uuids",
            Category::CompanyIdentifiers => "company_identifiers",
            Category::AdTypes => "ad_types",
        }
    }

    /// The location of the category within the snapshot
    ///
    /// For UUIDs this is a directory containing one YAML file per kind of UUID, for the others
    /// it is a single YAML file.
    pub fn relative_path(&self) -> &'static str {
        match self {
            Category::Uuids => "assigned_numbers/uuids",
            Category::CompanyIdentifiers => "assigned_numbers/company_identifiers/company_identifiers.yaml",
            Category::AdTypes => "assigned_numbers/core/ad_types.yaml",
        }
    }

    /// The key of the top level list within the category's files
    pub fn list_key(&self) -> &'static str {
        match self {
            Category::Uuids => "uuids",
            Category::CompanyIdentifiers => "company_identifiers",
            Category::AdTypes => "ad_types",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(String);

/// The parsed table of a category
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryTable {
    Uuids(UuidTable),
    CompanyIdentifiers(CompanyIdentifierTable),
    AdTypes(AdTypeTable),
}

impl CategoryTable {
    pub fn category(&self) -> Category {
        match self {
            CategoryTable::Uuids(_) => Category::Uuids,
            CategoryTable::CompanyIdentifiers(_) => Category::CompanyIdentifiers,
            CategoryTable::AdTypes(_) => Category::AdTypes,
        }
    }

    /// The number of records within the table
    pub fn len(&self) -> usize {
        match self {
            CategoryTable::Uuids(table) => table.len(),
            CategoryTable::CompanyIdentifiers(table) => table.len(),
            CategoryTable::AdTypes(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse the files of a category within the snapshot at `root`
pub fn parse_category(root: &Path, category: Category) -> Result<CategoryTable, ParseError> {
    match category {
        Category::Uuids => parse_uuids(root).map(CategoryTable::Uuids),
        Category::CompanyIdentifiers => parse_company_identifiers(root).map(CategoryTable::CompanyIdentifiers),
        Category::AdTypes => parse_ad_types(root).map(CategoryTable::AdTypes),
    }
}

/// A number as it is written within a registry file
///
/// The registry writes its numbers as YAML integers (usually in hexadecimal, which YAML
/// understands), but a number within a string is also accepted. A string with the prefix `0x` is
/// hexadecimal, otherwise it is decimal.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum AssignedNumber {
    Integer(u64),
    Text(String),
}

impl AssignedNumber {
    fn to_u64(&self) -> Option<u64> {
        match self {
            AssignedNumber::Integer(val) => Some(*val),
            AssignedNumber::Text(text) => {
                let text = text.trim();

                match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                    Some(hex) => u64::from_str_radix(hex, 16).ok(),
                    None => text.parse().ok(),
                }
            }
        }
    }

    /// Get the number if it fits within `T`
    fn narrow<T: TryFrom<u64>>(&self) -> Option<T> {
        self.to_u64().and_then(|val| T::try_from(val).ok())
    }
}

impl core::fmt::Display for AssignedNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            AssignedNumber::Integer(val) => write!(f, "{:#x}", val),
            AssignedNumber::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Read the top level list of a registry file
fn read_list(category: Category, path: &Path) -> Result<Vec<serde_yaml::Value>, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|e| ParseError::new(category, path, e))?;

    let document: serde_yaml::Value = serde_yaml::from_str(&text).map_err(|e| ParseError::new(category, path, e))?;

    let list = match document {
        serde_yaml::Value::Mapping(mut mapping) => mapping.remove(category.list_key()),
        _ => None,
    };

    match list {
        Some(serde_yaml::Value::Sequence(list)) => Ok(list),
        _ => Err(ParseError::new(
            category,
            path,
            ParseErrorKind::MissingList(category.list_key()),
        )),
    }
}

/// Deserialize each entry of a list, skipping the entries that do not match `T`
fn entries<T>(category: Category, path: &Path, list: Vec<serde_yaml::Value>) -> impl Iterator<Item = T> + '_
where
    T: serde::de::DeserializeOwned,
{
    list.into_iter()
        .enumerate()
        .filter_map(move |(index, value)| match serde_yaml::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping entry {} of {} file {}: {}", index, category, path.display(), e);

                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names() {
        for category in Category::ALL {
            assert_eq!(Ok(category), category.name().parse());
        }

        assert!("services".parse::<Category>().is_err());

        assert_eq!("company_identifiers", Category::CompanyIdentifiers.to_string());
    }

    #[test]
    fn assigned_numbers() {
        let numbers: Vec<AssignedNumber> = serde_yaml::from_str("[0x004C, 76, '0x1A', '26', 'x']").unwrap();

        let values: Vec<Option<u64>> = numbers.iter().map(AssignedNumber::to_u64).collect();

        assert_eq!(vec![Some(0x4C), Some(76), Some(0x1A), Some(26), None], values);

        assert_eq!(None, AssignedNumber::Integer(0x1_0000).narrow::<u16>());
        assert_eq!(Some(0xFFu8), AssignedNumber::Integer(0xFF).narrow());
    }

    #[test]
    fn missing_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad_types.yaml");

        std::fs::write(&path, "types:\n  - value: 0x01\n    name: Flags\n").unwrap();

        let error = read_list(Category::AdTypes, &path).unwrap_err();

        assert_eq!(Category::AdTypes, error.category);
        assert!(matches!(error.kind, ParseErrorKind::MissingList("ad_types")));
    }

    #[test]
    fn invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad_types.yaml");

        std::fs::write(&path, "ad_types: [\n").unwrap();

        let error = read_list(Category::AdTypes, &path).unwrap_err();

        assert_eq!(path, error.path);
        assert!(matches!(error.kind, ParseErrorKind::Yaml(_)));
    }

    #[test]
    fn document_that_is_not_a_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad_types.yaml");

        std::fs::write(&path, "- value: 0x01\n  name: Flags\n").unwrap();

        let error = read_list(Category::AdTypes, &path).unwrap_err();

        assert!(matches!(error.kind, ParseErrorKind::MissingList("ad_types")));
    }

    #[test]
    fn parse_each_category() {
        let dir = tempfile::tempdir().unwrap();

        let files = [
            (
                "assigned_numbers/uuids/service_uuids.yaml",
                "uuids:\n  - uuid: 0x180F\n    name: Battery\n  - uuid: 0x180D\n    name: Heart Rate\n",
            ),
            (
                "assigned_numbers/company_identifiers/company_identifiers.yaml",
                "company_identifiers:\n  - value: 0x004C\n    name: 'Apple, Inc.'\n",
            ),
            (
                "assigned_numbers/core/ad_types.yaml",
                "ad_types:\n  - value: 0x01\n    name: Flags\n  - value: 0x09\n    name: Complete Local Name\n  - value: 0xFF\n    name: Manufacturer Specific Data\n",
            ),
        ];

        for (relative, content) in files {
            let path = dir.path().join(relative);

            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        let lengths = [2, 1, 3];

        for (category, len) in Category::ALL.into_iter().zip(lengths) {
            let table = parse_category(dir.path(), category).unwrap();

            assert_eq!(category, table.category());
            assert_eq!(len, table.len());
            assert!(!table.is_empty());
        }
    }

    #[test]
    fn unreadable_file() {
        let dir = tempfile::tempdir().unwrap();

        let error = read_list(Category::AdTypes, &dir.path().join("missing.yaml")).unwrap_err();

        assert!(matches!(error.kind, ParseErrorKind::Io(_)));
    }
}
