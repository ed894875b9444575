// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeMap;

use simnet_uplink::{Principal, PRINCIPAL_BYTES};

/// The balance every genesis account starts with, in micro-units.
pub const GENESIS_BALANCE: u128 = 100_000_000_000_000;

const WALLETS: usize = 8;

/// The fixture accounts a network is born with: `deployer` plus `wallet_1`
/// through `wallet_8`, each seeded with [`GENESIS_BALANCE`].
///
/// Principals are derived by hashing the wallet name, so the same symbolic
/// name resolves to the same principal on every network.
#[derive(Debug, Clone)]
pub struct Accounts {
    map: BTreeMap<String, Principal>,
}

impl Accounts {
    pub(crate) fn genesis() -> Self {
        let mut map = BTreeMap::new();
        map.insert("deployer".to_string(), derive_principal("deployer"));
        for i in 1..=WALLETS {
            let name = format!("wallet_{i}");
            let principal = derive_principal(&name);
            map.insert(name, principal);
        }
        Self { map }
    }

    /// Resolves a symbolic wallet name to its principal.
    pub fn get(&self, name: &str) -> Option<Principal> {
        self.map.get(name).copied()
    }

    /// The principal contracts are deployed under.
    pub fn deployer(&self) -> Principal {
        self.get("deployer").expect("genesis contains the deployer")
    }

    /// Iterates over `(name, principal)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Principal)> {
        self.map.iter().map(|(name, principal)| {
            (name.as_str(), *principal)
        })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Derives the principal for a seed string by truncating its `blake3` hash.
pub(crate) fn derive_principal(seed: &str) -> Principal {
    let hash = blake3::hash(seed.as_bytes());
    let mut bytes = [0u8; PRINCIPAL_BYTES];
    bytes.copy_from_slice(&hash.as_bytes()[..PRINCIPAL_BYTES]);
    Principal::from_bytes(bytes)
}
