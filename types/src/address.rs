//! Global-state address: 70 lowercase hex characters.

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An address in the validator's global state.
///
/// The first 3 bytes are a namespace prefix, the remaining 32 bytes are a
/// digest of the key being addressed. Always rendered as lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Number of raw bytes behind an address.
    pub const BYTES: usize = 35;
    /// Number of hex characters in a rendered address.
    pub const LENGTH: usize = Self::BYTES * 2;

    /// Build an address from its raw bytes.
    pub fn from_bytes(bytes: &[u8; Self::BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a rendered address, rejecting anything but 70 lowercase hex characters.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        if is_lower_hex(raw, Self::LENGTH) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TypeError::InvalidAddress(raw.to_string()))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6-hex-character namespace this address lives in.
    pub fn namespace(&self) -> &str {
        &self.0[..6]
    }
}

/// Whether `raw` is exactly `len` characters of `[0-9a-f]`.
pub fn is_lower_hex(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
