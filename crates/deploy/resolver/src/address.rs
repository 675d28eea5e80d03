// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Account addresses contracts are deployed to

use crate::error::{ContractError, ContractResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an account address in bytes
pub const ADDRESS_LENGTH: usize = 8;

/// An 8-byte account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a hex address, with or without `0x` prefix
    ///
    /// Short input is right-aligned, so `0x1` and `0x0000000000000001` are the
    /// same address.
    pub fn from_hex(value: &str) -> ContractResult<Self> {
        let invalid = |reason: &str| ContractError::InvalidAddress {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value);
        if digits.is_empty() {
            return Err(invalid("address is empty"));
        }

        let padded = if digits.len() % 2 == 1 { format!("0{digits}") } else { digits.to_string() };
        let decoded = hex::decode(&padded).map_err(|e| invalid(&e.to_string()))?;
        if decoded.len() > ADDRESS_LENGTH {
            return Err(invalid(&format!("address is longer than {ADDRESS_LENGTH} bytes")));
        }

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - decoded.len()..].copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Address formatted as a Cadence address literal, e.g. `0x01cf0e2f2f715450`
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Address::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_address() {
        let address = Address::from_hex("0x01cf0e2f2f715450").unwrap();
        assert_eq!(address.as_bytes(), &[0x01, 0xcf, 0x0e, 0x2f, 0x2f, 0x71, 0x54, 0x50]);
        assert_eq!(address.to_string(), "01cf0e2f2f715450");
        assert_eq!(address.to_hex_literal(), "0x01cf0e2f2f715450");
    }

    #[test]
    fn test_short_and_odd_length_addresses_are_right_aligned() {
        assert_eq!(Address::from_hex("0x1").unwrap(), Address::new([0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(Address::from_hex("CAFE").unwrap().to_hex_literal(), "0x000000000000cafe");
        assert_eq!(Address::from_hex("0X0f").unwrap(), "0x000000000000000f".parse().unwrap());
    }

    #[test]
    fn test_invalid_addresses() {
        for value in ["", "0x", "0xzz", "0x01cf0e2f2f71545001"] {
            let err = Address::from_hex(value).unwrap_err();
            assert!(matches!(err, ContractError::InvalidAddress { .. }), "{value} should be rejected");
        }
    }

    #[test]
    fn test_serde_uses_hex_literal() {
        let address = Address::from_hex("f8d6e0586b0a20c7").unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0xf8d6e0586b0a20c7\"");

        let decoded: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, address);
        assert!(serde_json::from_str::<Address>("\"0xnothex\"").is_err());
    }
}
