//! Advertising Data: Service Class UUID and Service Solicitation Data Types
//!
//! The struct Services is the data type for a list of service UUIDs. The same format is used for
//! the complete and incomplete lists of service class UUIDs and for the lists of service
//! solicitation UUIDs, the AD type is what tells them apart.

use super::*;
use crate::Uuid;
use alloc::collections::BTreeSet;

/// The kind of service UUID list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// A complete list of the service class UUIDs of the device
    Complete,
    /// An incomplete list of the service class UUIDs of the device
    Incomplete,
    /// A list of the services the device would like to use from a peer
    Solicitation,
}

/// Internal trait for specifying the Data Type Value
///
/// For UUIDs there is a complete, incomplete, and solicitation list version for each UUID type
/// (16, 32, 128 bit).
trait DataType {
    const INCOMPLETE: AssignedTypes;
    const COMPLETE: AssignedTypes;
    const SOLICITATION: AssignedTypes;
}

impl DataType for Services<u16> {
    const INCOMPLETE: AssignedTypes = AssignedTypes::IncompleteListOf16bitServiceClassUUIDs;
    const COMPLETE: AssignedTypes = AssignedTypes::CompleteListOf16bitServiceClassUUIDs;
    const SOLICITATION: AssignedTypes = AssignedTypes::ListOf16bitServiceSolicitationUUIDs;
}

impl DataType for Services<u32> {
    const INCOMPLETE: AssignedTypes = AssignedTypes::IncompleteListOf32bitServiceClassUUIDs;
    const COMPLETE: AssignedTypes = AssignedTypes::CompleteListOf32bitServiceClassUUIDs;
    const SOLICITATION: AssignedTypes = AssignedTypes::ListOf32bitServiceSolicitationUUIDs;
}

impl DataType for Services<u128> {
    const INCOMPLETE: AssignedTypes = AssignedTypes::IncompleteListOf128bitServiceClassUUIDs;
    const COMPLETE: AssignedTypes = AssignedTypes::CompleteListOf128bitServiceClassUUIDs;
    const SOLICITATION: AssignedTypes = AssignedTypes::ListOf128bitServiceSolicitationUUIDs;
}

/// Service UUIDs
///
/// This is a set of service UUIDs with sizes of u16, u32, or u128, so duplicate UUIDs cannot
/// exist within an instance of `Services`.
///
/// ```
/// # use bluenumbers_gap::assigned::service_uuids::{ListKind, Services};
/// # use bluenumbers_gap::Uuid;
/// let services: Services<u16> = Services::new(ListKind::Complete, [0x180F, 0x180A]);
///
/// assert!(services.uuids().any(|uuid| uuid == Uuid::from_u16(0x180F)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Services<T>
where
    T: Ord,
{
    set: BTreeSet<T>,
    kind: ListKind,
}

impl<T> Services<T>
where
    T: Ord,
{
    pub fn new<I>(kind: ListKind, uuids: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Services {
            set: uuids.into_iter().collect(),
            kind,
        }
    }

    /// Get the kind of list
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// True if the list is a complete list of service UUIDs
    pub fn is_complete(&self) -> bool {
        self.kind == ListKind::Complete
    }

    /// Iterate over the UUIDs as full sized Bluetooth UUIDs
    pub fn uuids(&self) -> impl Iterator<Item = Uuid> + '_
    where
        T: Copy + Into<Uuid>,
    {
        self.set.iter().map(|v| (*v).into())
    }
}

impl<T> core::ops::Deref for Services<T>
where
    T: Ord,
{
    type Target = BTreeSet<T>;

    fn deref(&self) -> &Self::Target {
        &self.set
    }
}

impl<T> IntoIterator for Services<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = <BTreeSet<T> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

/// Implementation for primitive type numbers
///
/// Requires `$ty` to implement the methods `to_le_bytes` and `from_le_bytes`
macro_rules! impl_raw {
    ( $ty:tt ) => {
        impl IntoStruct for Services<$ty> {
            fn assigned_type(&self) -> AssignedTypes {
                match self.kind {
                    ListKind::Complete => Self::COMPLETE,
                    ListKind::Incomplete => Self::INCOMPLETE,
                    ListKind::Solicitation => Self::SOLICITATION,
                }
            }

            fn data_len(&self) -> usize {
                core::mem::size_of::<$ty>() * self.set.len()
            }

            fn write_data(&self, data: &mut Vec<u8>) {
                self.set.iter().for_each(|v| data.extend_from_slice(&v.to_le_bytes()));
            }
        }

        impl Services<$ty> {
            /// Decode a service UUID list in the order the UUIDs were sent
            ///
            /// Unlike the conversion into `Services`, duplicate UUIDs are kept.
            pub fn decode_list(st: EirOrAdStruct<'_>) -> Result<(ListKind, Vec<$ty>), Error> {
                let kind = match st.get_type() {
                    v if v == Self::COMPLETE.val() => ListKind::Complete,
                    v if v == Self::INCOMPLETE.val() => ListKind::Incomplete,
                    v if v == Self::SOLICITATION.val() => ListKind::Solicitation,
                    _ => return Err(Error::IncorrectAssignedType),
                };

                let chunks = st.get_data().chunks_exact(core::mem::size_of::<$ty>());

                if !chunks.remainder().is_empty() {
                    return Err(Error::IncorrectLength);
                }

                let list = chunks
                    .map(|raw_uuid| {
                        let mut buffer = [0; core::mem::size_of::<$ty>()];

                        buffer.copy_from_slice(raw_uuid);

                        <$ty>::from_le_bytes(buffer)
                    })
                    .collect();

                Ok((kind, list))
            }
        }

        impl TryFromStruct<'_> for Services<$ty> {
            fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
                let (kind, list) = Self::decode_list(st)?;

                Ok(Services {
                    set: list.into_iter().collect(),
                    kind,
                })
            }
        }
    };
}

impl_raw! {u16}
impl_raw! {u32}
impl_raw! {u128}
