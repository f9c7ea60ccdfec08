//! Records of the registry
//!
//! Each record is a plain copy of the fields of an entry within one of the registry's YAML files.

use bluenumbers_gap::Uuid;
use serde::{Deserialize, Serialize};

/// An assigned 16 bit UUID
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignedUuid {
    pub short_uuid: u16,
    pub name: String,
    /// The identifier of the UUID (for example `org.bluetooth.service.battery_service`)
    ///
    /// Not every category of UUIDs gives its entries an identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The name of the file the UUID was listed in, without the extension
    pub category: String,
}

impl AssignedUuid {
    /// Get the full 128 bit UUID
    ///
    /// The short UUID is expanded with the Bluetooth Base UUID.
    ///
    /// ```
    /// # use bluenumbers::AssignedUuid;
    /// let uuid = AssignedUuid {
    ///     short_uuid: 0x180F,
    ///     name: "Battery".into(),
    ///     id: None,
    ///     category: "service_uuids".into(),
    /// };
    ///
    /// assert_eq!("0000180f-0000-1000-8000-00805f9b34fb", uuid.full_uuid().to_string());
    /// ```
    pub fn full_uuid(&self) -> uuid::Uuid {
        Uuid::from_u16(self.short_uuid).into()
    }
}

/// A company identifier
///
/// These are the identifiers used within manufacturer specific data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyIdentifier {
    pub value: u16,
    pub name: String,
}

/// An AD type
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdTypeInfo {
    pub value: u8,
    pub name: String,
    /// The document defining the data format
    #[serde(default)]
    pub reference: String,
}

impl AdTypeInfo {
    /// Get the AD type as it is known to the advertising data decoder
    pub fn assigned_type(&self) -> Option<bluenumbers_gap::assigned::AssignedTypes> {
        bluenumbers_gap::assigned::AssignedTypes::try_from_val(self.value)
    }
}
