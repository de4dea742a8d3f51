//! Four-character codes.
//!
//! Core Audio packs four ASCII bytes into a 32-bit value for format IDs,
//! property IDs and many status codes. The bytes are always read in
//! big-endian order, so `'fmt?'` is `0x666D_743F` on every host.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::status::OsStatus;

/// Pack a four-byte tag into its big-endian `u32` value
pub const fn fourcc(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

const fn is_printable(byte: u8) -> bool {
    matches!(byte, 32..=126)
}

/// Check whether all four bytes of `code` are printable ASCII
pub fn is_printable_four_char_code(code: OsStatus) -> bool {
    (code as u32).to_be_bytes().into_iter().all(is_printable)
}

/// Render a status code for diagnostics
///
/// Returns the quoted tag (e.g. `'fmt?'`) when all four bytes are
/// printable ASCII, otherwise the decimal value of the code. The check is
/// purely on the byte pattern: a code that only happens to look like text
/// is still rendered as text.
pub fn four_char_code(code: OsStatus) -> String {
    let bytes = (code as u32).to_be_bytes();
    if bytes.into_iter().all(is_printable) {
        let tag: String = bytes.into_iter().map(char::from).collect();
        format!("'{tag}'")
    } else {
        code.to_string()
    }
}

/// A 32-bit four-character code such as a format or property ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCharCode(pub u32);

impl FourCharCode {
    #[must_use]
    pub const fn new(tag: &[u8; 4]) -> Self {
        Self(fourcc(tag))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The four bytes in big-endian (display) order
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for FourCharCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<FourCharCode> for u32 {
    fn from(code: FourCharCode) -> Self {
        code.0
    }
}

impl fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&four_char_code(self.0 as OsStatus))
    }
}

impl Serialize for FourCharCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when parsing a [`FourCharCode`] from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFourCharCodeError {
    #[error("four-character code must be exactly 4 bytes, got {0}")]
    Length(usize),
}

impl FromStr for FourCharCode {
    type Err = ParseFourCharCodeError;

    /// Parse `abcd` or the quoted form `'abcd'`
    ///
    /// Quotes are only stripped from six-byte input, so tags that begin
    /// and end with `'` themselves (`'ab'`) parse as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = if s.len() == 6 {
            s.strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
                .unwrap_or(s)
        } else {
            s
        };

        let bytes: [u8; 4] = tag
            .as_bytes()
            .try_into()
            .map_err(|_| ParseFourCharCodeError::Length(tag.len()))?;

        Ok(Self::new(&bytes))
    }
}
