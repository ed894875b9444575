// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use simnet_uplink::{
    ContractError, ContractId, Event, Principal, TxEnv, Value,
};

use crate::accounts::derive_principal;
use crate::state::{ChainState, ContractState};

/// Flat gas charge for dispatching any call.
pub(crate) const CALL_BASE_COST: u64 = 100;

const READ_COST: u64 = 10;
const WRITE_COST: u64 = 100;
const TRANSFER_COST: u64 = 100;
const EVENT_COST: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Public,
    ReadOnly,
}

/// The [`TxEnv`] handed to a contract for the duration of a single call.
///
/// Works directly on the session's chain state; the session snapshots the
/// state before dispatch and rolls back on failure, so the environment never
/// needs to undo anything itself.
pub(crate) struct SessionEnv<'a> {
    state: &'a mut ChainState,
    contract: ContractId,
    sender: Principal,
    kind: CallKind,
    gas_limit: u64,
    gas_spent: u64,
    events: Vec<Event>,
}

impl<'a> SessionEnv<'a> {
    pub fn new(
        state: &'a mut ChainState,
        contract: ContractId,
        sender: Principal,
        kind: CallKind,
        gas_limit: u64,
    ) -> Self {
        Self {
            state,
            contract,
            sender,
            kind,
            gas_limit,
            gas_spent: 0,
            events: vec![],
        }
    }

    pub fn charge(&mut self, cost: u64) -> Result<(), ContractError> {
        let spent = self.gas_spent.saturating_add(cost);
        if spent > self.gas_limit {
            self.gas_spent = self.gas_limit;
            return Err(ContractError::OutOfGas);
        }
        self.gas_spent = spent;
        Ok(())
    }

    /// Consumes the environment, yielding the events the call emitted and
    /// the gas it spent.
    pub fn finish(self) -> (Vec<Event>, u64) {
        (self.events, self.gas_spent)
    }

    fn guard_write(&self, op: &'static str) -> Result<(), ContractError> {
        match self.kind {
            CallKind::Public => Ok(()),
            CallKind::ReadOnly => Err(ContractError::ReadOnlyViolation(op)),
        }
    }

    fn contract_state(&self) -> &ContractState {
        self.state
            .contracts
            .get(self.contract.name())
            .expect("the called contract's state exists")
    }

    fn contract_state_mut(&mut self) -> &mut ContractState {
        self.state
            .contracts
            .get_mut(self.contract.name())
            .expect("the called contract's state exists")
    }
}

impl TxEnv for SessionEnv<'_> {
    fn sender(&self) -> Principal {
        self.sender
    }

    fn contract(&self) -> &ContractId {
        &self.contract
    }

    fn contract_principal(&self) -> Principal {
        derive_principal(&self.contract.to_string())
    }

    fn block_height(&self) -> u64 {
        self.state.block_height
    }

    fn balance(&self, owner: &Principal) -> u128 {
        self.state.balance(owner)
    }

    fn transfer(
        &mut self,
        to: &Principal,
        amount: u128,
    ) -> Result<(), ContractError> {
        self.guard_write("transfer")?;
        self.charge(TRANSFER_COST)?;
        let from = self.sender;
        self.state.transfer(&from, to, amount)
    }

    fn var_get(
        &mut self,
        name: &str,
    ) -> Result<Option<Value>, ContractError> {
        self.charge(READ_COST)?;
        Ok(self.contract_state().vars.get(name).cloned())
    }

    fn var_set(
        &mut self,
        name: &str,
        value: Value,
    ) -> Result<(), ContractError> {
        self.guard_write("var-set")?;
        self.charge(WRITE_COST)?;
        self.contract_state_mut().vars.insert(name.to_string(), value);
        Ok(())
    }

    fn map_get(
        &mut self,
        map: &str,
        key: &Value,
    ) -> Result<Option<Value>, ContractError> {
        self.charge(READ_COST)?;
        Ok(self
            .contract_state()
            .maps
            .get(map)
            .and_then(|entries| entries.get(&key.to_string()))
            .cloned())
    }

    fn map_insert(
        &mut self,
        map: &str,
        key: &Value,
        value: Value,
    ) -> Result<(), ContractError> {
        self.guard_write("map-insert")?;
        self.charge(WRITE_COST)?;
        self.contract_state_mut()
            .maps
            .entry(map.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn emit(
        &mut self,
        topic: &str,
        data: Value,
    ) -> Result<(), ContractError> {
        self.guard_write("emit")?;
        self.charge(EVENT_COST)?;
        self.events.push(Event {
            source: self.contract.clone(),
            topic: topic.to_string(),
            data,
        });
        Ok(())
    }
}
