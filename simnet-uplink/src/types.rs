// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use core::fmt;
use core::str::FromStr;

use crate::Value;

/// The length of a [`Principal`] in bytes
pub const PRINCIPAL_BYTES: usize = 20;

/// An account on the simulated network, identified by a 20-byte hash.
///
/// Principals render as `S` followed by the uppercase hex encoding of their
/// bytes, and parse back from the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal([u8; PRINCIPAL_BYTES]);

impl Principal {
    /// Creates a new [`Principal`] from an array of bytes
    pub const fn from_bytes(bytes: [u8; PRINCIPAL_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the array of bytes that make up the [`Principal`]
    pub const fn to_bytes(self) -> [u8; PRINCIPAL_BYTES] {
        self.0
    }

    /// Returns a reference to the array of bytes that make up the
    /// [`Principal`]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PRINCIPAL_BYTES]> for Principal {
    fn from(bytes: [u8; PRINCIPAL_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", hex::encode_upper(self.0))
    }
}

/// The error returned when parsing a [`Principal`] from its literal form
/// fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid principal literal")]
pub struct ParsePrincipalError;

impl FromStr for Principal {
    type Err = ParsePrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix('S').ok_or(ParsePrincipalError)?;
        let bytes = hex::decode(hex_part).map_err(|_| ParsePrincipalError)?;
        let bytes: [u8; PRINCIPAL_BYTES] =
            bytes.try_into().map_err(|_| ParsePrincipalError)?;
        Ok(Self(bytes))
    }
}

/// ID of a deployed contract: the deploying principal together with the name
/// the contract was deployed under.
///
/// Renders as `<principal>.<name>`, the form used to address contracts on
/// the network.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractId {
    deployer: Principal,
    name: String,
}

impl ContractId {
    /// Creates a new [`ContractId`] for a contract deployed under `name` by
    /// `deployer`.
    pub fn new<N: Into<String>>(deployer: Principal, name: N) -> Self {
        Self {
            deployer,
            name: name.into(),
        }
    }

    /// The principal that deployed the contract.
    pub fn deployer(&self) -> &Principal {
        &self.deployer
    }

    /// The name the contract was deployed under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.deployer, self.name)
    }
}

/// An event emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: ContractId,
    pub topic: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_roundtrip() {
        let principal = Principal::from_bytes([0xab; PRINCIPAL_BYTES]);
        let literal = principal.to_string();

        assert!(literal.starts_with('S'));
        assert_eq!(literal.parse::<Principal>(), Ok(principal));
    }

    #[test]
    fn principal_rejects_malformed_literals() {
        assert!("".parse::<Principal>().is_err());
        assert!("Qabab".parse::<Principal>().is_err());
        // too short
        assert!("Sabab".parse::<Principal>().is_err());
        assert!("Szzzz".parse::<Principal>().is_err());
    }

    #[test]
    fn contract_id_display() {
        let deployer = Principal::from_bytes([1; PRINCIPAL_BYTES]);
        let id = ContractId::new(deployer, "tpp");

        assert_eq!(id.to_string(), format!("{deployer}.tpp"));
    }
}
