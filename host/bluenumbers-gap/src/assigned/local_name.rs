//! Local name data type
//!
//! The local name is the name for the Bluetooth device. The data for the local name structure is
//! just a sequence of utf-8 characters. The name of the device may be too long for a transport
//! payload to contain so there is two versions of a local name. The complete local name is the
//! full local name of the device. The shortened local name is an alternative name or abbreviation
//! of the device name that should be easily relatable to the complete local name.

use super::*;
use alloc::string::String;

/// A Local Name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalName {
    name: String,
    is_complete: bool,
}

impl LocalName {
    /// Create a new local name
    ///
    /// Input `is_complete` is false when `name` is a shortened local name.
    pub fn new<N: Into<String>>(name: N, is_complete: bool) -> Self {
        LocalName {
            name: name.into(),
            is_complete,
        }
    }

    /// Get the string slice for the name
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Convert this `LocalName` into its name
    pub fn into_name(self) -> String {
        self.name
    }

    /// Check if the name is complete
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}

impl IntoStruct for LocalName {
    fn assigned_type(&self) -> AssignedTypes {
        if self.is_complete {
            AssignedTypes::CompleteLocalName
        } else {
            AssignedTypes::ShortenedLocalName
        }
    }

    fn data_len(&self) -> usize {
        self.name.len()
    }

    fn write_data(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(self.name.as_bytes())
    }
}

impl TryFromStruct<'_> for LocalName {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
        let is_complete = match AssignedTypes::try_from_val(st.get_type()) {
            Some(AssignedTypes::CompleteLocalName) => true,
            Some(AssignedTypes::ShortenedLocalName) => false,
            _ => return Err(Error::IncorrectAssignedType),
        };

        let name = core::str::from_utf8(st.get_data()).map_err(Error::UTF8Error)?;

        Ok(LocalName::new(name, is_complete))
    }
}
