//! Owned advertising data
//!
//! [`AdPacket`] is the owned form of an advertising (or EIR) payload as it was received. Each
//! structure is kept as its raw bytes so a packet converts back into the exact payload, and the
//! typed value of a structure is only created when it is asked for with [`AdStruct::decode`].

use crate::assigned::flags::Flags;
use crate::assigned::local_name::LocalName;
use crate::assigned::manufacturer_data::ManufacturerData;
use crate::assigned::service_data::ServiceData;
use crate::assigned::service_uuids::Services;
use crate::assigned::uri::Uri;
use crate::assigned::{AssignedTypes, ConvertError, EirOrAdIterator, EirOrAdStruct, Error, IntoStruct, SequenceVec};
use crate::Uuid;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The decoded value of an AD structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdValue {
    Flags(Flags),
    /// A list of service class or service solicitation UUIDs
    Uuids(Vec<Uuid>),
    ServiceData { uuid: Uuid, data: Vec<u8> },
    ManufacturerData(ManufacturerData),
    /// A local name, broadcast name, or URI
    Text(String),
}

/// A single owned AD structure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdStruct {
    raw: Vec<u8>,
}

impl AdStruct {
    /// Create an AD structure from an assigned number and its data
    pub fn new(ad_type: u8, data: &[u8]) -> Result<Self, ConvertError> {
        if data.len() > crate::assigned::MAX_DATA_LEN {
            return Err(ConvertError {
                required: data.len(),
                remaining: crate::assigned::MAX_DATA_LEN,
            });
        }

        let mut raw = Vec::with_capacity(crate::assigned::HEADER_SIZE + data.len());

        raw.push((data.len() + 1) as u8);
        raw.push(ad_type);
        raw.extend_from_slice(data);

        Ok(AdStruct { raw })
    }

    /// Create an AD structure from a local type
    pub fn from_local<T: IntoStruct + ?Sized>(t: &T) -> Result<Self, ConvertError> {
        let mut sequence = SequenceVec::new();

        sequence.try_add(t)?;

        Ok(AdStruct {
            raw: sequence.into_inner(),
        })
    }

    /// The value of the length field
    pub fn length(&self) -> u8 {
        self.raw[0]
    }

    /// The AD type (assigned number) of this structure
    pub fn ad_type(&self) -> u8 {
        self.raw[1]
    }

    /// The AD type if it is a known assigned number
    pub fn assigned_type(&self) -> Option<AssignedTypes> {
        AssignedTypes::try_from_val(self.ad_type())
    }

    pub fn data(&self) -> &[u8] {
        &self.raw[2..]
    }

    pub fn as_struct(&self) -> EirOrAdStruct<'_> {
        EirOrAdStruct::from_validated(&self.raw)
    }

    /// The structure as it is sent over the air
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Decode the data of this structure
    ///
    /// `Ok(None)` is returned for AD types that have no decoder here (or are not assigned). An
    /// error is returned if the data does not follow the format for its AD type.
    pub fn decode(&self) -> Result<Option<AdValue>, Error> {
        let Some(assigned_type) = self.assigned_type() else {
            return Ok(None);
        };

        let st = self.as_struct();

        let value = match assigned_type {
            AssignedTypes::Flags => AdValue::Flags(st.try_into()?),
            AssignedTypes::IncompleteListOf16bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf16bitServiceClassUUIDs
            | AssignedTypes::ListOf16bitServiceSolicitationUUIDs => {
                uuid_list_value(Services::<u16>::decode_list(st)?.1)
            }
            AssignedTypes::IncompleteListOf32bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf32bitServiceClassUUIDs
            | AssignedTypes::ListOf32bitServiceSolicitationUUIDs => {
                uuid_list_value(Services::<u32>::decode_list(st)?.1)
            }
            AssignedTypes::IncompleteListOf128bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf128bitServiceClassUUIDs
            | AssignedTypes::ListOf128bitServiceSolicitationUUIDs => {
                uuid_list_value(Services::<u128>::decode_list(st)?.1)
            }
            AssignedTypes::ServiceData16BitUUID => service_data_value(st.try_into::<ServiceData<u16>>()?),
            AssignedTypes::ServiceData32BitUUID => service_data_value(st.try_into::<ServiceData<u32>>()?),
            AssignedTypes::ServiceData128BitUUID => service_data_value(st.try_into::<ServiceData<u128>>()?),
            AssignedTypes::ManufacturerSpecificData => AdValue::ManufacturerData(st.try_into()?),
            AssignedTypes::ShortenedLocalName | AssignedTypes::CompleteLocalName => {
                AdValue::Text(st.try_into::<LocalName>()?.into_name())
            }
            AssignedTypes::URI => AdValue::Text(st.try_into::<Uri>()?.to_uri_string()),
            AssignedTypes::BroadcastName => {
                let text = core::str::from_utf8(st.get_data()).map_err(Error::UTF8Error)?;

                AdValue::Text(text.to_string())
            }
            _ => return Ok(None),
        };

        Ok(Some(value))
    }
}

fn uuid_list_value<T: Into<Uuid>>(list: Vec<T>) -> AdValue {
    AdValue::Uuids(list.into_iter().map(Into::into).collect())
}

fn service_data_value<T: Copy + Into<Uuid>>(service_data: ServiceData<T>) -> AdValue {
    let uuid = service_data.full_uuid();

    AdValue::ServiceData {
        uuid,
        data: service_data.into_data(),
    }
}

impl<'a> From<EirOrAdStruct<'a>> for AdStruct {
    fn from(st: EirOrAdStruct<'a>) -> Self {
        AdStruct {
            raw: st.into_inner().to_vec(),
        }
    }
}

/// An advertising payload
///
/// ```
/// # use bluenumbers_gap::AdPacket;
/// let raw = [
///     2, 0x01, 0x06,             // flags
///     3, 0x03, 0x0F, 0x18,       // complete list of 16 bit service UUIDs (battery service)
///     5, 0xFF, 0x4C, 0x00, 1, 2, // manufacturer specific data for company 0x004C
/// ];
///
/// let packet = AdPacket::from_bytes(&raw);
///
/// assert_eq!(3, packet.structs().len());
/// assert_eq!(Some(0x004C), packet.manufacturer_id());
/// assert_eq!(&raw[..], &packet.to_bytes()[..]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdPacket {
    structs: Vec<AdStruct>,
}

impl AdPacket {
    pub fn new() -> Self {
        AdPacket::default()
    }

    /// Create a packet from raw advertising data
    ///
    /// Incorrectly formatted data is not reported. The packet will contain every structure up to
    /// the first one that is malformed, or up to a length field of zero.
    pub fn from_bytes(data: &[u8]) -> Self {
        let structs = EirOrAdIterator::new(data).silent().map(AdStruct::from).collect();

        AdPacket { structs }
    }

    /// Try to create a packet from raw advertising data
    ///
    /// Unlike [`from_bytes`](AdPacket::from_bytes) an error is returned if a structure's length
    /// runs past the end of `data`.
    pub fn try_from_bytes(data: &[u8]) -> Result<Self, Error> {
        let structs = EirOrAdIterator::new(data)
            .map(|st| st.map(AdStruct::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AdPacket { structs })
    }

    pub fn push(&mut self, ad_struct: AdStruct) {
        self.structs.push(ad_struct)
    }

    pub fn structs(&self) -> &[AdStruct] {
        &self.structs
    }

    /// Get the first structure with the AD type
    pub fn get(&self, ad_type: AssignedTypes) -> Option<&AdStruct> {
        self.get_all(ad_type).next()
    }

    /// Get every structure with the AD type
    pub fn get_all(&self, ad_type: AssignedTypes) -> impl Iterator<Item = &AdStruct> + '_ {
        self.structs
            .iter()
            .filter(move |ad_struct| ad_struct.ad_type() == ad_type.val())
    }

    /// Get all UUIDs within the service UUID lists and service data of this packet
    ///
    /// Structures that cannot be decoded are skipped.
    pub fn uuids(&self) -> Vec<Uuid> {
        let mut uuids = Vec::new();

        for ad_struct in self.structs.iter() {
            match ad_struct.decode() {
                Ok(Some(AdValue::Uuids(list))) => uuids.extend(list),
                Ok(Some(AdValue::ServiceData { uuid, .. })) => uuids.push(uuid),
                _ => (),
            }
        }

        uuids
    }

    /// Get the manufacturer specific data
    pub fn manufacturer_data(&self) -> Option<ManufacturerData> {
        self.get(AssignedTypes::ManufacturerSpecificData)
            .and_then(|ad_struct| ad_struct.as_struct().try_into().ok())
    }

    /// Get the company identifier of the manufacturer specific data
    pub fn manufacturer_id(&self) -> Option<u16> {
        self.manufacturer_data().map(|data| data.company_identifier())
    }

    /// Get the name of the device
    ///
    /// The complete local name is preferred over the shortened local name.
    pub fn name(&self) -> Option<String> {
        [AssignedTypes::CompleteLocalName, AssignedTypes::ShortenedLocalName]
            .into_iter()
            .filter_map(|ty| self.get(ty))
            .find_map(|ad_struct| ad_struct.as_struct().try_into::<LocalName>().ok())
            .map(LocalName::into_name)
    }

    /// Convert the packet back into raw advertising data
    pub fn to_bytes(&self) -> Vec<u8> {
        self.structs.iter().flat_map(|ad_struct| ad_struct.as_bytes()).copied().collect()
    }
}

impl FromIterator<AdStruct> for AdPacket {
    fn from_iter<I: IntoIterator<Item = AdStruct>>(iter: I) -> Self {
        AdPacket {
            structs: iter.into_iter().collect(),
        }
    }
}
