//! Descriptions of advertising data
//!
//! A description is a decoded [`AdPacket`] joined with the registry. AD types, company
//! identifiers, and 16 bit UUIDs are given the names the registry has for them.
//!
//! ```no_run
//! # use bluenumbers::{describe::describe, gap::AdPacket, Registry};
//! # fn main() -> Result<(), bluenumbers::Error> {
//! let registry = Registry::local("bluetooth_sig_public");
//!
//! let packet = AdPacket::from_bytes(&[2, 0x01, 0x06, 3, 0x03, 0x0F, 0x18]);
//!
//! print!("{}", describe(&registry, &packet)?);
//! # Ok(())
//! # }
//! ```

use crate::error::Error;
use crate::registry::Registry;
use bluenumbers_gap::{AdPacket, AdStruct, AdValue, Uuid};
use serde::Serialize;

/// The description of an advertising packet
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PacketDescription {
    /// The name of the device
    pub name: Option<String>,
    pub structs: Vec<StructDescription>,
}

/// The description of a single AD structure
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructDescription {
    pub length: u8,
    pub ad_type: u8,
    /// The name of the AD type within the registry
    pub ad_type_name: Option<String>,
    /// The data of the structure as hexadecimal
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueDescription>,
    /// Why the data could not be decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A decoded AD structure
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDescription {
    Flags {
        bits: u8,
        labels: Vec<String>,
    },
    Uuids {
        uuids: Vec<UuidDescription>,
    },
    ServiceData {
        uuid: UuidDescription,
        data: String,
    },
    ManufacturerData {
        company_identifier: u16,
        company_name: Option<String>,
        data: String,
    },
    Text {
        text: String,
    },
}

/// A UUID with its name
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UuidDescription {
    /// The full UUID
    pub uuid: String,
    /// The name of the UUID if it is a 16 bit UUID within the registry
    pub name: Option<String>,
}

/// Describe an advertising packet
///
/// The registry tables needed by the packet are loaded, so an error is returned when the
/// registry cannot be loaded. A structure that fails to decode is not an error, the reason is put
/// within the [`StructDescription`].
pub fn describe(registry: &Registry, packet: &AdPacket) -> Result<PacketDescription, Error> {
    let structs = packet
        .structs()
        .iter()
        .map(|ad_struct| describe_struct(registry, ad_struct))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PacketDescription {
        name: packet.name(),
        structs,
    })
}

/// Describe a single AD structure
pub fn describe_struct(registry: &Registry, ad_struct: &AdStruct) -> Result<StructDescription, Error> {
    let ad_type_name = registry.get_ad_type(ad_struct.ad_type())?.map(|info| info.name);

    let (value, error) = match ad_struct.decode() {
        Ok(Some(value)) => (Some(describe_value(registry, value)?), None),
        Ok(None) => (None, None),
        Err(e) => {
            log::debug!("cannot decode AD type {:#04x}: {}", ad_struct.ad_type(), e);

            (None, Some(e.to_string()))
        }
    };

    Ok(StructDescription {
        length: ad_struct.length(),
        ad_type: ad_struct.ad_type(),
        ad_type_name,
        data: hex::encode(ad_struct.data()),
        value,
        error,
    })
}

fn describe_value(registry: &Registry, value: AdValue) -> Result<ValueDescription, Error> {
    let description = match value {
        AdValue::Flags(flags) => ValueDescription::Flags {
            bits: flags.bits(),
            labels: flags.iter().map(|label| label.to_string()).collect(),
        },
        AdValue::Uuids(uuids) => ValueDescription::Uuids {
            uuids: uuids
                .into_iter()
                .map(|uuid| describe_uuid(registry, uuid))
                .collect::<Result<_, _>>()?,
        },
        AdValue::ServiceData { uuid, data } => ValueDescription::ServiceData {
            uuid: describe_uuid(registry, uuid)?,
            data: hex::encode(data),
        },
        AdValue::ManufacturerData(manufacturer_data) => {
            let company_identifier = manufacturer_data.company_identifier();

            ValueDescription::ManufacturerData {
                company_identifier,
                company_name: registry
                    .get_company_identifier(company_identifier)?
                    .map(|company| company.name),
                data: hex::encode(manufacturer_data.get_data()),
            }
        }
        AdValue::Text(text) => ValueDescription::Text { text },
    };

    Ok(description)
}

fn describe_uuid(registry: &Registry, uuid: Uuid) -> Result<UuidDescription, Error> {
    let name = match u16::try_from(uuid) {
        Ok(short_uuid) => registry.get_uuid(short_uuid)?.map(|assigned| assigned.name),
        Err(_) => None,
    };

    Ok(UuidDescription {
        uuid: uuid.to_string(),
        name,
    })
}

impl core::fmt::Display for UuidDescription {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.uuid, name),
            None => f.write_str(&self.uuid),
        }
    }
}

impl core::fmt::Display for StructDescription {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{:#04x} {}: {}",
            self.ad_type,
            self.ad_type_name.as_deref().unwrap_or("unknown AD type"),
            self.data
        )?;

        match &self.value {
            Some(ValueDescription::Flags { labels, .. }) => write!(f, "\n    {}", labels.join(", "))?,
            Some(ValueDescription::Uuids { uuids }) => {
                for uuid in uuids {
                    write!(f, "\n    {}", uuid)?;
                }
            }
            Some(ValueDescription::ServiceData { uuid, data }) => write!(f, "\n    {}: {}", uuid, data)?,
            Some(ValueDescription::ManufacturerData {
                company_identifier,
                company_name,
                data,
            }) => write!(
                f,
                "\n    {:#06x} ({}): {}",
                company_identifier,
                company_name.as_deref().unwrap_or("unknown company"),
                data
            )?,
            Some(ValueDescription::Text { text }) => write!(f, "\n    {:?}", text)?,
            None => (),
        }

        if let Some(error) = &self.error {
            write!(f, "\n    error: {}", error)?;
        }

        Ok(())
    }
}

impl core::fmt::Display for PacketDescription {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "name: {}", name)?;
        }

        for description in self.structs.iter() {
            writeln!(f, "{}", description)?;
        }

        Ok(())
    }
}
