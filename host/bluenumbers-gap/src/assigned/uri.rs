//! Uniform Resource Identifier data type
//!
//! The data of a URI structure starts with a single UTF-8 encoded code point that stands for the
//! scheme of the URI (the "scheme name string" code points of the assigned numbers). The rest of
//! the data is the URI without its scheme.

use super::*;
use alloc::string::String;

/// Code point meaning the URI is not prefixed with a scheme
const EMPTY_SCHEME: char = '\u{1}';

/// Scheme name string code points
const SCHEMES: &[(char, &str)] = &[
    ('\u{16}', "http:"),
    ('\u{17}', "https:"),
];

/// A URI
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uri {
    raw: String,
}

impl Uri {
    /// Create a `Uri` from a full URI
    ///
    /// A known scheme is replaced with its code point when this is converted into a structure.
    pub fn new(uri: &str) -> Self {
        let raw = SCHEMES
            .iter()
            .find_map(|(code, scheme)| uri.strip_prefix(scheme).map(|rest| (code, rest)))
            .map(|(code, rest)| {
                let mut raw = String::with_capacity(rest.len() + 1);

                raw.push(*code);
                raw.push_str(rest);
                raw
            })
            .unwrap_or_else(|| {
                let mut raw = String::with_capacity(uri.len() + 1);

                raw.push(EMPTY_SCHEME);
                raw.push_str(uri);
                raw
            });

        Uri { raw }
    }

    /// The data as it is within the structure (with the scheme code point)
    pub fn as_raw(&self) -> &str {
        &self.raw
    }

    /// Get the scheme of the URI
    ///
    /// `None` is returned when there is no scheme or the code point is not known.
    pub fn scheme(&self) -> Option<&'static str> {
        let code = self.raw.chars().next()?;

        SCHEMES.iter().find(|(c, _)| *c == code).map(|(_, scheme)| *scheme)
    }

    /// Get the URI with its scheme expanded
    ///
    /// An unknown scheme code point is left in place.
    pub fn to_uri_string(&self) -> String {
        let mut chars = self.raw.chars();

        match chars.next() {
            Some(EMPTY_SCHEME) => chars.as_str().into(),
            Some(code) => match self.scheme() {
                Some(scheme) => {
                    let mut uri = String::from(scheme);

                    uri.push_str(chars.as_str());
                    uri
                }
                None => {
                    let mut uri = String::new();

                    uri.push(code);
                    uri.push_str(chars.as_str());
                    uri
                }
            },
            None => String::new(),
        }
    }
}

impl IntoStruct for Uri {
    fn assigned_type(&self) -> AssignedTypes {
        AssignedTypes::URI
    }

    fn data_len(&self) -> usize {
        self.raw.len()
    }

    fn write_data(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(self.raw.as_bytes())
    }
}

impl TryFromStruct<'_> for Uri {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error> {
        if st.get_type() != AssignedTypes::URI.val() {
            return Err(Error::IncorrectAssignedType);
        }

        let raw = core::str::from_utf8(st.get_data()).map_err(Error::UTF8Error)?;

        if raw.is_empty() {
            return Err(Error::RawTooSmall);
        }

        Ok(Uri { raw: raw.into() })
    }
}
