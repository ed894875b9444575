// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use simnet_uplink::{ContractError, Principal, Value};

use crate::Error;

/// Height of the chain when a network is born.
pub(crate) const GENESIS_HEIGHT: u64 = 1;

/// The full state of the simulated chain at a point in time: account
/// balances, per-contract datastores, and the chain height.
///
/// Snapshots are cheap to clone and serialize canonically, which is what
/// call atomicity and commit roots are built on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChainState {
    pub block_height: u64,
    pub ledger: BTreeMap<Principal, u128>,
    pub contracts: BTreeMap<String, ContractState>,
}

/// The datastore of a single deployed contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ContractState {
    pub vars: BTreeMap<String, Value>,
    // outer key: map name; inner key: canonical literal of the entry key
    pub maps: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ChainState {
    pub fn genesis(balances: BTreeMap<Principal, u128>) -> Self {
        Self {
            block_height: GENESIS_HEIGHT,
            ledger: balances,
            contracts: BTreeMap::new(),
        }
    }

    /// The root of the state: a `blake3` hash over its canonical
    /// serialization. Doubles as the ID of a commit.
    pub fn root(&self) -> Result<[u8; 32], Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).into())
    }

    pub fn balance(&self, owner: &Principal) -> u128 {
        self.ledger.get(owner).copied().unwrap_or_default()
    }

    pub fn transfer(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), ContractError> {
        let available = self.balance(from);
        if available < amount {
            return Err(ContractError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        self.ledger.insert(*from, available - amount);
        self.ledger.insert(*to, credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simnet_uplink::PRINCIPAL_BYTES;

    fn principal(fill: u8) -> Principal {
        Principal::from_bytes([fill; PRINCIPAL_BYTES])
    }

    #[test]
    fn transfer_moves_funds() {
        let mut balances = BTreeMap::new();
        balances.insert(principal(1), 100);

        let mut state = ChainState::genesis(balances);
        state
            .transfer(&principal(1), &principal(2), 60)
            .expect("transfer within balance succeeds");

        assert_eq!(state.balance(&principal(1)), 40);
        assert_eq!(state.balance(&principal(2)), 60);
    }

    #[test]
    fn transfer_rejects_overdraw() {
        let mut state = ChainState::genesis(BTreeMap::new());

        let err = state
            .transfer(&principal(1), &principal(2), 1)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientBalance {
                required: 1,
                available: 0,
            }
        );
        assert_eq!(state.balance(&principal(2)), 0);
    }

    #[test]
    fn roots_change_with_state() {
        let mut balances = BTreeMap::new();
        balances.insert(principal(1), 100);

        let mut state = ChainState::genesis(balances);
        let root = state.root().expect("state serializes");

        state
            .transfer(&principal(1), &principal(2), 1)
            .expect("transfer within balance succeeds");

        assert_ne!(state.root().expect("state serializes"), root);
    }
}
