//! Assigned numbers and the associated data formats
//!
//! The assigned numbers for AD types come from the Bluetooth SIG and are published in the
//! `assigned_numbers/core/ad_types.yaml` file of the registry. These numbers identify the meaning
//! and corresponding data format for whoever is the receiver. They are used within Extended
//! Inquiry Response (EIR), Advertising Data (AD), and out of band (OOB) pairing data.
//!
//! While data assigned a number is used in different places, the general format for the container
//! of the data is the same. One byte for length, one byte for the assigned number, and multiple
//! bytes for the data. There are two names for these containers, they are *EIR struct* and *AD
//! struct*.

pub mod flags;
pub mod local_name;
pub mod manufacturer_data;
pub mod service_data;
pub mod service_uuids;
pub mod uri;

use alloc::vec::Vec;

/// The size of the header for either an EIR or AD structure
///
/// The full size of either an EIR or AD structure is this plus the size of the data.
pub const HEADER_SIZE: usize = 2;

/// The maximum size of the data of a single structure
///
/// The length byte covers the AD type byte as well as the data.
pub const MAX_DATA_LEN: usize = u8::MAX as usize - 1;

/// AD types
///
/// `DeviceID` and `SecurityManagerTKValue` share the same assigned number. The meaning depends on
/// where the structure is found, so [`try_from_val`] will always return `DeviceID` for `0x10`.
///
/// [`try_from_val`]: AssignedTypes::try_from_val
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum AssignedTypes {
    Flags,
    IncompleteListOf16bitServiceClassUUIDs,
    CompleteListOf16bitServiceClassUUIDs,
    IncompleteListOf32bitServiceClassUUIDs,
    CompleteListOf32bitServiceClassUUIDs,
    IncompleteListOf128bitServiceClassUUIDs,
    CompleteListOf128bitServiceClassUUIDs,
    ShortenedLocalName,
    CompleteLocalName,
    TxPowerLevel,
    ClassOfDevice,
    SimplePairingHashC192,
    SimplePairingRandomizerR192,
    DeviceID,
    SecurityManagerTKValue,
    SecurityManagerOutOfBandFlags,
    PeripheralConnectionIntervalRange,
    ListOf16bitServiceSolicitationUUIDs,
    ListOf128bitServiceSolicitationUUIDs,
    ServiceData16BitUUID,
    PublicTargetAddress,
    RandomTargetAddress,
    Appearance,
    AdvertisingInterval,
    LEBluetoothDeviceAddress,
    LERole,
    SimplePairingHashC256,
    SimplePairingRandomizerR256,
    ListOf32bitServiceSolicitationUUIDs,
    ServiceData32BitUUID,
    ServiceData128BitUUID,
    LESecureConnectionsConfirmationValue,
    LESecureConnectionsRandomValue,
    URI,
    IndoorPositioning,
    TransportDiscoveryData,
    LESupportedFeatures,
    ChannelMapUpdateIndication,
    PBADV,
    MeshMessage,
    MeshBeacon,
    BIGInfo,
    BroadcastCode,
    ResolvableSetIdentifier,
    AdvertisingIntervalLong,
    BroadcastName,
    EncryptedAdvertisingData,
    PeriodicAdvertisingResponseTimingInformation,
    ElectronicShelfLabel,
    _3DInformationData,
    ManufacturerSpecificData,
}

impl AssignedTypes {
    const ALL: [AssignedTypes; 50] = [
        AssignedTypes::Flags,
        AssignedTypes::IncompleteListOf16bitServiceClassUUIDs,
        AssignedTypes::CompleteListOf16bitServiceClassUUIDs,
        AssignedTypes::IncompleteListOf32bitServiceClassUUIDs,
        AssignedTypes::CompleteListOf32bitServiceClassUUIDs,
        AssignedTypes::IncompleteListOf128bitServiceClassUUIDs,
        AssignedTypes::CompleteListOf128bitServiceClassUUIDs,
        AssignedTypes::ShortenedLocalName,
        AssignedTypes::CompleteLocalName,
        AssignedTypes::TxPowerLevel,
        AssignedTypes::ClassOfDevice,
        AssignedTypes::SimplePairingHashC192,
        AssignedTypes::SimplePairingRandomizerR192,
        AssignedTypes::DeviceID,
        AssignedTypes::SecurityManagerOutOfBandFlags,
        AssignedTypes::PeripheralConnectionIntervalRange,
        AssignedTypes::ListOf16bitServiceSolicitationUUIDs,
        AssignedTypes::ListOf128bitServiceSolicitationUUIDs,
        AssignedTypes::ServiceData16BitUUID,
        AssignedTypes::PublicTargetAddress,
        AssignedTypes::RandomTargetAddress,
        AssignedTypes::Appearance,
        AssignedTypes::AdvertisingInterval,
        AssignedTypes::LEBluetoothDeviceAddress,
        AssignedTypes::LERole,
        AssignedTypes::SimplePairingHashC256,
        AssignedTypes::SimplePairingRandomizerR256,
        AssignedTypes::ListOf32bitServiceSolicitationUUIDs,
        AssignedTypes::ServiceData32BitUUID,
        AssignedTypes::ServiceData128BitUUID,
        AssignedTypes::LESecureConnectionsConfirmationValue,
        AssignedTypes::LESecureConnectionsRandomValue,
        AssignedTypes::URI,
        AssignedTypes::IndoorPositioning,
        AssignedTypes::TransportDiscoveryData,
        AssignedTypes::LESupportedFeatures,
        AssignedTypes::ChannelMapUpdateIndication,
        AssignedTypes::PBADV,
        AssignedTypes::MeshMessage,
        AssignedTypes::MeshBeacon,
        AssignedTypes::BIGInfo,
        AssignedTypes::BroadcastCode,
        AssignedTypes::ResolvableSetIdentifier,
        AssignedTypes::AdvertisingIntervalLong,
        AssignedTypes::BroadcastName,
        AssignedTypes::EncryptedAdvertisingData,
        AssignedTypes::PeriodicAdvertisingResponseTimingInformation,
        AssignedTypes::ElectronicShelfLabel,
        AssignedTypes::_3DInformationData,
        AssignedTypes::ManufacturerSpecificData,
    ];

    pub const fn val(&self) -> u8 {
        match *self {
            AssignedTypes::Flags => 0x01,
            AssignedTypes::IncompleteListOf16bitServiceClassUUIDs => 0x02,
            AssignedTypes::CompleteListOf16bitServiceClassUUIDs => 0x03,
            AssignedTypes::IncompleteListOf32bitServiceClassUUIDs => 0x04,
            AssignedTypes::CompleteListOf32bitServiceClassUUIDs => 0x05,
            AssignedTypes::IncompleteListOf128bitServiceClassUUIDs => 0x06,
            AssignedTypes::CompleteListOf128bitServiceClassUUIDs => 0x07,
            AssignedTypes::ShortenedLocalName => 0x08,
            AssignedTypes::CompleteLocalName => 0x09,
            AssignedTypes::TxPowerLevel => 0x0A,
            AssignedTypes::ClassOfDevice => 0x0D,
            AssignedTypes::SimplePairingHashC192 => 0x0E,
            AssignedTypes::SimplePairingRandomizerR192 => 0x0F,
            AssignedTypes::DeviceID => 0x10,
            AssignedTypes::SecurityManagerTKValue => 0x10,
            AssignedTypes::SecurityManagerOutOfBandFlags => 0x11,
            AssignedTypes::PeripheralConnectionIntervalRange => 0x12,
            AssignedTypes::ListOf16bitServiceSolicitationUUIDs => 0x14,
            AssignedTypes::ListOf128bitServiceSolicitationUUIDs => 0x15,
            AssignedTypes::ServiceData16BitUUID => 0x16,
            AssignedTypes::PublicTargetAddress => 0x17,
            AssignedTypes::RandomTargetAddress => 0x18,
            AssignedTypes::Appearance => 0x19,
            AssignedTypes::AdvertisingInterval => 0x1A,
            AssignedTypes::LEBluetoothDeviceAddress => 0x1B,
            AssignedTypes::LERole => 0x1C,
            AssignedTypes::SimplePairingHashC256 => 0x1D,
            AssignedTypes::SimplePairingRandomizerR256 => 0x1E,
            AssignedTypes::ListOf32bitServiceSolicitationUUIDs => 0x1F,
            AssignedTypes::ServiceData32BitUUID => 0x20,
            AssignedTypes::ServiceData128BitUUID => 0x21,
            AssignedTypes::LESecureConnectionsConfirmationValue => 0x22,
            AssignedTypes::LESecureConnectionsRandomValue => 0x23,
            AssignedTypes::URI => 0x24,
            AssignedTypes::IndoorPositioning => 0x25,
            AssignedTypes::TransportDiscoveryData => 0x26,
            AssignedTypes::LESupportedFeatures => 0x27,
            AssignedTypes::ChannelMapUpdateIndication => 0x28,
            AssignedTypes::PBADV => 0x29,
            AssignedTypes::MeshMessage => 0x2A,
            AssignedTypes::MeshBeacon => 0x2B,
            AssignedTypes::BIGInfo => 0x2C,
            AssignedTypes::BroadcastCode => 0x2D,
            AssignedTypes::ResolvableSetIdentifier => 0x2E,
            AssignedTypes::AdvertisingIntervalLong => 0x2F,
            AssignedTypes::BroadcastName => 0x30,
            AssignedTypes::EncryptedAdvertisingData => 0x31,
            AssignedTypes::PeriodicAdvertisingResponseTimingInformation => 0x32,
            AssignedTypes::ElectronicShelfLabel => 0x34,
            AssignedTypes::_3DInformationData => 0x3D,
            AssignedTypes::ManufacturerSpecificData => 0xFF,
        }
    }

    /// Get the AD type for an assigned number
    ///
    /// `None` is returned for numbers that are not (yet) assigned to an AD type.
    pub fn try_from_val(val: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.val() == val)
    }

    /// Get the bit size of the UUIDs contained within a list or service data type
    pub fn uuid_bit_size(&self) -> Option<usize> {
        match *self {
            AssignedTypes::IncompleteListOf16bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf16bitServiceClassUUIDs
            | AssignedTypes::ListOf16bitServiceSolicitationUUIDs
            | AssignedTypes::ServiceData16BitUUID => Some(16),
            AssignedTypes::IncompleteListOf32bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf32bitServiceClassUUIDs
            | AssignedTypes::ListOf32bitServiceSolicitationUUIDs
            | AssignedTypes::ServiceData32BitUUID => Some(32),
            AssignedTypes::IncompleteListOf128bitServiceClassUUIDs
            | AssignedTypes::CompleteListOf128bitServiceClassUUIDs
            | AssignedTypes::ListOf128bitServiceSolicitationUUIDs
            | AssignedTypes::ServiceData128BitUUID => Some(128),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The assigned type within the structure is different from the expected type
    IncorrectAssignedType,
    /// The length byte contains an invalid value
    IncorrectLength,
    /// The buffer is too small for the structure
    RawTooSmall,
    /// Failed converting from an assumed UTF8 formatted bytes
    UTF8Error(core::str::Utf8Error),
    /// The data contains a value that is not valid for the type
    InvalidData,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Error::IncorrectAssignedType => write!(f, "Incorrect Assigned Type Field"),
            Error::IncorrectLength => write!(
                f,
                "The length of this type is larger than the remaining bytes in the packet"
            ),
            Error::RawTooSmall => write!(f, "Raw data length is too small"),
            Error::UTF8Error(utf8_err) => write!(
                f,
                "UTF-8 conversion error, valid up to {}: '{}'",
                utf8_err.valid_up_to(),
                utf8_err
            ),
            Error::InvalidData => write!(f, "Invalid data for the assigned type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The error when a type is too large to fit within a single structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertError {
    /// The data length of the type
    pub required: usize,
    /// The maximum data length of a structure
    pub remaining: usize,
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "structure data requires {} bytes but only {} bytes are available",
            self.required, self.remaining
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}

/// A trait for converting a local type into an Extended Inquiry Response (EIR) or Advertising Data
/// (AD) Structure
pub trait IntoStruct {
    /// The AD type the local type is converted into
    fn assigned_type(&self) -> AssignedTypes;

    /// The length of the structure's data
    fn data_len(&self) -> usize;

    /// Append the data of the structure to `data`
    ///
    /// Exactly `data_len` bytes must be appended.
    fn write_data(&self, data: &mut Vec<u8>);
}

/// A trait for attempting to convert an Extended Inquiry Response (EIR) or Advertising Data (AD)
/// Structure to a local type
pub trait TryFromStruct<'a> {
    /// Attempt to convert an EIR or AD struct into this type
    fn try_from_struct(st: EirOrAdStruct<'a>) -> Result<Self, Error>
    where
        Self: Sized;
}

/// A wrapper around an EIR or AD structure
///
/// There is no functional difference between an EIR struct and an AD struct, but they are used
/// in different places within the Bluetooth specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EirOrAdStruct<'a>(&'a [u8]);

impl<'a> EirOrAdStruct<'a> {
    /// Try to create a new `EirOrAdStruct`
    ///
    /// This will return a new `EirOrAdStruct` if `bytes` starts with and contains a complete EIR or
    /// AD struct. A slice to the rest of the bytes is returned with a new `EirOrAdStruct`.
    ///
    /// `None` is returned if the length in the structure is zero. This is used to indicate an
    /// early termination of the entire data sequence, so any bytes that come after it are to be
    /// ignored.
    pub fn try_new(bytes: &'a [u8]) -> Result<Option<(Self, &'a [u8])>, Error> {
        let len = *bytes.first().ok_or(Error::RawTooSmall)? as usize;

        match len {
            0 => Ok(None),
            len if len < bytes.len() => Ok(Some((Self(&bytes[..1 + len]), &bytes[1 + len..]))),
            _ => Err(Error::IncorrectLength),
        }
    }

    /// Wrap bytes already known to be exactly one structure
    pub(crate) fn from_validated(raw: &'a [u8]) -> Self {
        Self(raw)
    }

    /// Return the type (assigned number)
    pub fn get_type(&self) -> u8 {
        self.0[1]
    }

    /// Get the data bytes
    pub fn get_data(&self) -> &'a [u8] {
        let raw: &'a [u8] = self.0;

        &raw[2..]
    }

    /// Get the size of the structure
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Try to convert this struct into the type `T`
    pub fn try_into<T>(self) -> Result<T, Error>
    where
        T: TryFromStruct<'a>,
    {
        T::try_from_struct(self)
    }

    /// Convert into the inner struct data
    pub fn into_inner(self) -> &'a [u8] {
        self.0
    }
}

/// An iterator over EIR or AD structs
///
/// This is used to iterate over a contiguous series of either EIR or AD structures. The iterator
/// stops when there is no more data or a length field is zero (which is used to indicate an early
/// termination).
#[derive(Clone, Copy, Debug)]
pub struct EirOrAdIterator<'a>(&'a [u8]);

impl<'a> EirOrAdIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        EirOrAdIterator(data)
    }

    /// Create a iterator that doesn't report an error
    ///
    /// In general it is not the fault of the recipient when they receive incorrectly formatted EIR
    /// or AD structures, so instead of reporting an error this will just end the iteration.
    pub fn silent(self) -> impl Iterator<Item = EirOrAdStruct<'a>> + 'a {
        self.map_while(Result::ok)
    }
}

impl<'a> From<&'a [u8]> for EirOrAdIterator<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> Iterator for EirOrAdIterator<'a> {
    type Item = Result<EirOrAdStruct<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None;
        }

        match EirOrAdStruct::try_new(self.0) {
            Ok(None) => {
                self.0 = &[];

                None
            }
            Ok(Some((st, rest))) => {
                self.0 = rest;

                Some(Ok(st))
            }
            Err(e) => {
                self.0 = &[];

                Some(Err(e))
            }
        }
    }
}

/// A growable sequence of EIR or AD structures
///
/// This is used to place multiple different types that implement [`IntoStruct`] into a sequence
/// of structures.
///
/// ```
/// # use bluenumbers_gap::assigned::{local_name::LocalName, SequenceVec};
/// let local_name = LocalName::new("My Device", true);
///
/// let mut sequence = SequenceVec::new();
///
/// sequence.try_add(&local_name).unwrap();
///
/// assert_eq!(sequence.into_inner(), [0xa, 0x9, 0x4d, 0x79, 0x20, 0x44, 0x65, 0x76, 0x69, 0x63, 0x65]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequenceVec(Vec<u8>);

impl SequenceVec {
    /// Create a new `SequenceVec`
    pub fn new() -> Self {
        SequenceVec(Vec::new())
    }

    /// Add an item to the sequence
    ///
    /// # Error
    /// An error is returned if the data of `t` cannot fit within a single structure.
    pub fn try_add<T: IntoStruct + ?Sized>(&mut self, t: &T) -> Result<&mut Self, ConvertError> {
        let data_len = t.data_len();

        if data_len > MAX_DATA_LEN {
            return Err(ConvertError {
                required: data_len,
                remaining: MAX_DATA_LEN,
            });
        }

        self.0.push((data_len + 1) as u8);
        self.0.push(t.assigned_type().val());

        t.write_data(&mut self.0);

        Ok(self)
    }

    /// Get the inner vector
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl core::ops::Deref for SequenceVec {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
