//! Advertising Data: Flags
//!

use super::*;

/// The list of Flags defined in the Core Specification Supplement
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum FlagLabel {
    /// LE limited discoverable mode
    LeLimitedDiscoverableMode,
    /// LE general discoverable mode
    LeGeneralDiscoverableMode,
    /// BR/EDR not supported
    BrEdrNotSupported,
    /// The controller supports simultaneous BR/EDR and LE to the same device
    ControllerSupportsSimultaneousLeAndBrEdr,
    /// The host supports simultaneous BR/EDR and LE to the same device.
    #[deprecated(note = "this was depreciated in the Bluetooth Core Specification Supplement")]
    HostSupportsSimultaneousLeAndBrEdr,
}

impl FlagLabel {
    #[allow(deprecated)]
    const ALL: [FlagLabel; 5] = [
        FlagLabel::LeLimitedDiscoverableMode,
        FlagLabel::LeGeneralDiscoverableMode,
        FlagLabel::BrEdrNotSupported,
        FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr,
        FlagLabel::HostSupportsSimultaneousLeAndBrEdr,
    ];

    fn bit_position(&self) -> u8 {
        match *self {
            FlagLabel::LeLimitedDiscoverableMode => 0,
            FlagLabel::LeGeneralDiscoverableMode => 1,
            FlagLabel::BrEdrNotSupported => 2,
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => 3,
            #[allow(deprecated)]
            FlagLabel::HostSupportsSimultaneousLeAndBrEdr => 4,
        }
    }
}

impl core::fmt::Display for FlagLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            FlagLabel::LeLimitedDiscoverableMode => f.write_str("LE limited discoverable mode"),
            FlagLabel::LeGeneralDiscoverableMode => f.write_str("LE general discoverable mode"),
            FlagLabel::BrEdrNotSupported => f.write_str("BR/EDR not supported"),
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => {
                f.write_str("simultaneous LE and BR/EDR to same device capable (controller)")
            }
            #[allow(deprecated)]
            FlagLabel::HostSupportsSimultaneousLeAndBrEdr => {
                f.write_str("simultaneous LE and BR/EDR to same device capable (host)")
            }
        }
    }
}

/// AD flags type
///
/// Only the first octet of the flags data contains defined bits. Any further octets are reserved
/// and dropped when converting from a structure.
///
/// ```
/// # use bluenumbers_gap::assigned::flags::{FlagLabel, Flags};
/// let mut flags = Flags::new();
///
/// flags.set(FlagLabel::LeGeneralDiscoverableMode, true);
/// flags.set(FlagLabel::BrEdrNotSupported, true);
///
/// assert_eq!(0x06, flags.bits());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    bits: u8,
}

impl Flags {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::Flags;

    /// Creates a flags object with no enabled flag
    pub fn new() -> Self {
        Flags::default()
    }

    /// Create flags from the raw bit field
    pub fn from_bits(bits: u8) -> Self {
        Flags { bits }
    }

    /// Get the raw bit field
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Check if the flag is enabled
    pub fn is_enabled(&self, label: FlagLabel) -> bool {
        self.bits & (1 << label.bit_position()) != 0
    }

    /// Set the state of the flag to `state`
    pub fn set(&mut self, label: FlagLabel, state: bool) {
        if state {
            self.bits |= 1 << label.bit_position()
        } else {
            self.bits &= !(1 << label.bit_position())
        }
    }

    /// Get an iterator over the enabled flags
    pub fn iter(&self) -> impl Iterator<Item = FlagLabel> + '_ {
        FlagLabel::ALL.into_iter().filter(move |label| self.is_enabled(*label))
    }
}

impl IntoStruct for Flags {
    fn assigned_type(&self) -> AssignedTypes {
        Self::ASSIGNED_TYPE
    }

    /// No data is sent when no flag is enabled
    fn data_len(&self) -> usize {
        if self.bits == 0 {
            0
        } else {
            1
        }
    }

    fn write_data(&self, data: &mut Vec<u8>) {
        if self.bits != 0 {
            data.push(self.bits)
        }
    }
}

impl TryFromStruct<'_> for Flags {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
        if st.get_type() == Self::ASSIGNED_TYPE.val() {
            let bits = st.get_data().first().copied().unwrap_or_default();

            Ok(Flags { bits })
        } else {
            Err(Error::IncorrectAssignedType)
        }
    }
}
