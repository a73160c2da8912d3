//! 20-byte account addresses and referrer sanitization.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A 20-byte account address, parsed strictly from `0x` + 40 hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address, used as the null referrer and as the substitute
    /// account for address-scoped reads while the wallet is disconnected.
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Parse `0x` followed by exactly 40 hexadecimal digits.
    ///
    /// Anything else (wrong length, missing prefix, non-hex characters)
    /// returns `None`.
    pub fn parse(input: &str) -> Option<Address> {
        let hex_digits = input.strip_prefix("0x")?;
        if hex_digits.len() != 40 {
            return None;
        }
        let bytes = hex::decode(hex_digits).ok()?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Some(Address(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(s.trim()).ok_or_else(|| de::Error::custom(format!("invalid address: {s}")))
    }
}

/// Sanitize a typed referrer string before submission.
///
/// A valid strict-form address passes through unchanged; everything else is
/// replaced by the all-zero address.
pub fn sanitize_referrer(input: &str) -> Address {
    match Address::parse(input.trim()) {
        Some(addr) => addr,
        None => {
            if !input.trim().is_empty() {
                tracing::debug!(input, "referrer not a strict 40-hex-digit address, using zero");
            }
            Address::ZERO
        }
    }
}
