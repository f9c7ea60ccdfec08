//! Advertising Data: Manufacturer Specific Data
//!
//! The first two octets of the data are the company identifier (little endian) assigned by the
//! Bluetooth SIG, and the rest is defined by that company.

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManufacturerData {
    company_identifier: u16,
    data: Vec<u8>,
}

impl ManufacturerData {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::ManufacturerSpecificData;

    pub fn new(company_identifier: u16, data: Vec<u8>) -> Self {
        ManufacturerData {
            company_identifier,
            data,
        }
    }

    /// Get the company identifier
    ///
    /// The name of the company can be looked up within the `company_identifiers` category of the
    /// assigned numbers registry.
    pub fn company_identifier(&self) -> u16 {
        self.company_identifier
    }

    pub fn get_data(&self) -> &[u8] {
        &self.data
    }
}

impl IntoStruct for ManufacturerData {
    fn assigned_type(&self) -> AssignedTypes {
        Self::ASSIGNED_TYPE
    }

    fn data_len(&self) -> usize {
        2 + self.data.len()
    }

    fn write_data(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&self.company_identifier.to_le_bytes());
        data.extend_from_slice(&self.data);
    }
}

impl TryFromStruct<'_> for ManufacturerData {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
        if st.get_type() != Self::ASSIGNED_TYPE.val() {
            return Err(Error::IncorrectAssignedType);
        }

        match st.get_data() {
            [low, high, data @ ..] => Ok(ManufacturerData {
                company_identifier: u16::from_le_bytes([*low, *high]),
                data: data.to_vec(),
            }),
            _ => Err(Error::RawTooSmall),
        }
    }
}
