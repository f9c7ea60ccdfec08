//! Advertising and Extended Inquiry Response data
//!
//! Advertising data is a sequence of *AD structures*. Each structure is one byte for the length,
//! one byte for the AD type (an assigned number from the Bluetooth SIG), and the data formatted
//! as the *Core Specification Supplement* defines for that type.
//!
//! The types within [`assigned`] convert single structures to and from their local form, and
//! [`AdPacket`] holds an entire payload as received over the air.
//!
//! ```
//! # use bluenumbers_gap::{AdPacket, AdValue};
//! // flags, then the complete local name "Hi"
//! let raw = [2, 0x01, 0x06, 3, 0x09, b'H', b'i'];
//!
//! let packet = AdPacket::from_bytes(&raw);
//!
//! assert_eq!(Some("Hi"), packet.name().as_deref());
//! assert!(matches!(packet.structs()[0].decode(), Ok(Some(AdValue::Flags(_)))));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod assigned;
mod base_uuid;
pub mod packet;

pub use base_uuid::{Uuid, UuidFormatError};
pub use packet::{AdPacket, AdStruct, AdValue};
