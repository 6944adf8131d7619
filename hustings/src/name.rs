use crate::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Length in bytes of the fixed-size name identifier.
pub const NAME_LEN: usize = 32;

/// Fixed-length opaque identifier for a constituency, candidate or party
/// name.
///
/// A `Name` is the UTF-8 bytes of the name zero-padded to [`NAME_LEN`]
/// bytes. Truncating longer names down to the size bound is the caller's
/// responsibility; oversized input is rejected, not truncated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name([u8; NAME_LEN]);

impl Name {
    /// Encode a name, rejecting empty, oversized, or NUL-containing input.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let bytes = name.as_bytes();
        if bytes.len() > NAME_LEN {
            return Err(Error::NameTooLong);
        }
        // NUL bytes would not round-trip through the padded form
        if bytes.contains(&0) {
            return Err(Error::NameContainsNul);
        }
        let mut buf = [0u8; NAME_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Name(buf))
    }

    /// The decoded name, with padding stripped.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        // Constructed from valid UTF-8 only
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }

    pub fn to_array(&self) -> [u8; NAME_LEN] {
        self.0
    }

    /// The fixed-length wire form: all [`NAME_LEN`] bytes hex-encoded.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode the fixed-length wire form produced by [`Name::to_hex`].
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|_| Error::NameBadHex)?;
        if bytes.len() != NAME_LEN {
            return Err(Error::NameBadLen);
        }
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        if bytes[end..].iter().any(|&b| b != 0) {
            return Err(Error::NameBadEncoding);
        }
        let name = std::str::from_utf8(&bytes[..end]).map_err(|_| Error::NameBadEncoding)?;
        Name::new(name)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Name({})", self.as_str())
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Name::new(&s).map_err(de::Error::custom)
    }
}
