/// Universally Unique Identifier
///
/// A UUID in Bluetooth has some differences from the UUID of
/// [RFC 4122](https://datatracker.ietf.org/doc/html/rfc4122). They are still unique identifiers,
/// but to reduce the load of having to transfer 128-bits for commonly used identifiers, the
/// specification has mapped two ranges for shortened UUIDs. These shortened UUIDs are sized at 16
/// and 32 bit. A shortened UUID can always be converted into a full sized UUID by placing it
/// within the *Bluetooth Base UUID*.
///
/// ```
/// # use bluenumbers_gap::Uuid;
/// let uuid_16 = Uuid::from(0xAAAAu16);
///
/// assert!(uuid_16.can_be_16_bit());
///
/// assert_eq!("0000aaaa-0000-1000-8000-00805f9b34fb", uuid_16.to_string());
///
/// // The mapped region for shortened values does
/// // not begin a zero, so `123u128` cannot be a
/// // 16 bit sized UUID.
/// assert!(!Uuid::from(123u128).can_be_16_bit());
/// ```
///
/// ## Conversion
/// A UUID can be converted to a [uuid::Uuid](https://github.com/uuid-rs/uuid) if the feature
/// `uuid-crate` is enabled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uuid {
    value: u128,
}

impl Uuid {
    /// The Bluetooth Base UUID `00000000-0000-1000-8000-00805F9B34FB`
    ///
    /// See Vol 3 part B sec 2.5.1 of the Core Specification.
    pub const BLUETOOTH_BASE_UUID: u128 = 0x0000000000001000800000805F9B34FB;

    pub const fn from_u16(v: u16) -> Self {
        Self::from_u32(v as u32)
    }

    pub const fn from_u32(v: u32) -> Self {
        Uuid {
            value: ((v as u128) << 96) | Self::BLUETOOTH_BASE_UUID,
        }
    }

    pub const fn from_u128(v: u128) -> Self {
        Uuid { value: v }
    }

    /// Create a UUID from the little endian bytes of a 16, 32, or 128 bit UUID
    ///
    /// This is the form a UUID takes within advertising data. `None` is returned if the length of
    /// `bytes` is not 2, 4, or 16.
    pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            2 => Some(Self::from_u16(u16::from_le_bytes([bytes[0], bytes[1]]))),
            4 => Some(Self::from_u32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))),
            16 => {
                let mut array = [0u8; 16];

                array.copy_from_slice(bytes);

                Some(Self::from_u128(u128::from_le_bytes(array)))
            }
            _ => None,
        }
    }

    /// Returns true if the UUID can be a 16 bit shortened UUID
    pub fn can_be_16_bit(&self) -> bool {
        !((!0u16 as u128) << 96) & self.value == Uuid::BLUETOOTH_BASE_UUID
    }

    /// Returns true if the UUID can be a 32 bit shortened UUID
    pub fn can_be_32_bit(&self) -> bool {
        !((!0u32 as u128) << 96) & self.value == Uuid::BLUETOOTH_BASE_UUID
    }

    /// Display format for the shortened forms
    ///
    /// The format changes based on whether or not it is a 16 bit or 32 bit shortened UUID.
    fn display_type<F1, F2, F3>(
        &self,
        f: &mut core::fmt::Formatter,
        fn_16: F1,
        fn_32: F2,
        fn_128: F3,
    ) -> core::fmt::Result
    where
        F1: FnOnce(&u16, &mut core::fmt::Formatter) -> core::fmt::Result,
        F2: FnOnce(&u32, &mut core::fmt::Formatter) -> core::fmt::Result,
        F3: FnOnce(&u128, &mut core::fmt::Formatter) -> core::fmt::Result,
    {
        if let Ok(val) = <u16>::try_from(*self) {
            fn_16(&val, f)?;

            write!(f, " (16b)")
        } else if let Ok(val) = <u32>::try_from(*self) {
            fn_32(&val, f)?;

            write!(f, " (32b)")
        } else {
            fn_128(&self.value, f)?;

            write!(f, " (128b)")
        }
    }
}

impl core::fmt::Debug for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::LowerHex::fmt(self, f)
    }
}

/// The hyphenated 8-4-4-4-12 form of the full 128 bit UUID
impl core::fmt::Display for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let v = self.value;

        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF
        )
    }
}

impl core::fmt::LowerHex for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.display_type(
            f,
            |v, f| core::fmt::LowerHex::fmt(v, f),
            |v, f| core::fmt::LowerHex::fmt(v, f),
            |v, f| core::fmt::LowerHex::fmt(v, f),
        )
    }
}

impl core::fmt::UpperHex for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.display_type(
            f,
            |v, f| core::fmt::UpperHex::fmt(v, f),
            |v, f| core::fmt::UpperHex::fmt(v, f),
            |v, f| core::fmt::UpperHex::fmt(v, f),
        )
    }
}

impl From<u128> for Uuid {
    fn from(v: u128) -> Uuid {
        Self::from_u128(v)
    }
}

impl From<u32> for Uuid {
    fn from(v: u32) -> Uuid {
        Self::from_u32(v)
    }
}

impl From<u16> for Uuid {
    fn from(v: u16) -> Uuid {
        Self::from_u16(v)
    }
}

impl From<Uuid> for u128 {
    fn from(uuid: Uuid) -> u128 {
        uuid.value
    }
}

impl TryFrom<Uuid> for u32 {
    type Error = ();

    /// Try to convert a UUID into its 32 bit shortened form. This doesn't check that the value is
    /// an assigned number from the Bluetooth SIG.
    fn try_from(uuid: Uuid) -> Result<u32, ()> {
        if uuid.can_be_32_bit() {
            Ok((uuid.value >> 96) as u32)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Uuid> for u16 {
    type Error = ();

    /// Try to convert a UUID into its 16 bit shortened form. This doesn't check that the value is
    /// an assigned number from the Bluetooth SIG.
    fn try_from(uuid: Uuid) -> Result<u16, ()> {
        if uuid.can_be_16_bit() {
            Ok((uuid.value >> 96) as u16)
        } else {
            Err(())
        }
    }
}

#[cfg(feature = "uuid-crate")]
impl From<uuid::Uuid> for Uuid {
    fn from(uuid: uuid::Uuid) -> Uuid {
        Uuid::from_u128(uuid.as_u128())
    }
}

#[cfg(feature = "uuid-crate")]
impl From<Uuid> for uuid::Uuid {
    fn from(uuid: Uuid) -> uuid::Uuid {
        uuid::Uuid::from_u128(uuid.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UuidFormatError {
    /// A field between the hyphens has the wrong number of characters
    IncorrectFieldLength(usize),
    /// There is not five hyphen separated fields
    IncorrectFieldCount,
    /// A character is not a hexadecimal digit
    IncorrectDigit,
}

impl core::fmt::Display for UuidFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            UuidFormatError::IncorrectFieldLength(field) => {
                write!(f, "field {} has an incorrect number of characters", field)
            }
            UuidFormatError::IncorrectFieldCount => f.write_str("expected five hyphen separated fields"),
            UuidFormatError::IncorrectDigit => f.write_str("UUID contains a non hexadecimal digit"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UuidFormatError {}

/// Create a UUID from its formatted type
///
/// The format is a 16 octet UUID in the form of \[8\]-\[4\]-\[4\]-\[4\]-\[12\] where each number
/// represents the number of characters for the field. An example UUID would be
/// '0000180f-0000-1000-8000-00805f9b34fb'
impl core::str::FromStr for Uuid {
    type Err = UuidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FIELD_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

        let mut value = 0u128;
        let mut field_count = 0;

        for (index, field) in s.split('-').enumerate() {
            let expected = *FIELD_LENGTHS.get(index).ok_or(UuidFormatError::IncorrectFieldCount)?;

            if field.len() != expected {
                return Err(UuidFormatError::IncorrectFieldLength(index));
            }

            if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(UuidFormatError::IncorrectDigit);
            }

            let field_val = u64::from_str_radix(field, 16).or(Err(UuidFormatError::IncorrectDigit))?;

            value = (value << (expected * 4)) | field_val as u128;

            field_count += 1;
        }

        if field_count == FIELD_LENGTHS.len() {
            Ok(Uuid::from_u128(value))
        } else {
            Err(UuidFormatError::IncorrectFieldCount)
        }
    }
}
