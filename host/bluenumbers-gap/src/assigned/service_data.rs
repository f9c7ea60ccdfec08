//! Advertising Data: Service Data
//!
//! Service data is a UUID of a service followed by data specific to that service. There is a
//! service data AD type for each of the three UUID sizes (16, 32, and 128 bit).

use super::*;
use crate::Uuid;

/// Service Data
///
/// Contains a UUID along with the corresponding data for that UUID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceData<UuidType> {
    uuid: UuidType,
    data: Vec<u8>,
}

impl<UuidType> ServiceData<UuidType> {
    pub fn new(uuid: UuidType, data: Vec<u8>) -> Self {
        ServiceData { uuid, data }
    }

    pub fn get_uuid(&self) -> UuidType
    where
        UuidType: Copy,
    {
        self.uuid
    }

    /// Get the UUID as a full sized Bluetooth UUID
    pub fn full_uuid(&self) -> Uuid
    where
        UuidType: Copy + Into<Uuid>,
    {
        self.uuid.into()
    }

    /// Get the service specific data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! impl_raw {
    ( $ty:tt, $ad_type:path ) => {
        impl IntoStruct for ServiceData<$ty> {
            fn assigned_type(&self) -> AssignedTypes {
                $ad_type
            }

            fn data_len(&self) -> usize {
                core::mem::size_of::<$ty>() + self.data.len()
            }

            fn write_data(&self, data: &mut Vec<u8>) {
                data.extend_from_slice(&self.uuid.to_le_bytes());
                data.extend_from_slice(&self.data);
            }
        }

        impl TryFromStruct<'_> for ServiceData<$ty> {
            fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
                const UUID_SIZE: usize = core::mem::size_of::<$ty>();

                if st.get_type() != ($ad_type).val() {
                    return Err(Error::IncorrectAssignedType);
                }

                let raw = st.get_data();

                if raw.len() < UUID_SIZE {
                    return Err(Error::RawTooSmall);
                }

                let (uuid_raw, data) = raw.split_at(UUID_SIZE);

                let mut buffer = [0u8; UUID_SIZE];

                buffer.copy_from_slice(uuid_raw);

                Ok(ServiceData {
                    uuid: <$ty>::from_le_bytes(buffer),
                    data: data.to_vec(),
                })
            }
        }
    };
}

impl_raw! {u16, AssignedTypes::ServiceData16BitUUID }
impl_raw! {u32, AssignedTypes::ServiceData32BitUUID }
impl_raw! {u128, AssignedTypes::ServiceData128BitUUID }
