// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeSet;
use std::sync::Arc;

use simnet_uplink::{Contract, ContractId, Event, Principal, Value};

use crate::accounts::derive_principal;
use crate::session_env::{CallKind, SessionEnv, CALL_BASE_COST};
use crate::state::{ChainState, ContractState};
use crate::vm::VM;
use crate::Error;

/// Gas budget of a call unless the session overrides it.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

/// A running mutation to the chain state.
///
/// Sessions are spawned using a [`VM`] instance, and can be used to deploy
/// contracts and call into them. A sequence of these calls may then be
/// [`commit`]ed to, or discarded by simply allowing the session to drop.
///
/// [`VM`]: crate::VM
/// [`commit`]: Session::commit
pub struct Session {
    vm: VM,
    state: ChainState,
    deployed: BTreeSet<String>,
    gas_limit: u64,
}

/// The receipt given in response to a call.
#[derive(Debug)]
pub struct CallReceipt {
    /// The gas limit the call ran under.
    pub gas_limit: u64,
    /// The amount of gas spent in the execution of the call.
    pub gas_spent: u64,
    /// The events emitted during the execution of the call. Empty when the
    /// call rolled back.
    pub events: Vec<Event>,
    /// The response value the contract returned.
    pub result: Value,
}

impl Session {
    pub(crate) fn new(vm: VM) -> Self {
        let state = vm.head();
        Self {
            vm,
            state,
            deployed: BTreeSet::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Deploys `contract` under `name`, returning its [`ContractId`].
    ///
    /// Logic is registered with the VM; chain state for the contract is
    /// created - and its `init` hook run - only if no committed state exists
    /// for the name yet. Deploying a known name in a fresh session therefore
    /// re-attaches logic to the existing state, and is the normal way to
    /// reach a contract committed by an earlier session.
    ///
    /// # Errors
    /// Deploying the same name twice within one session is an error, as is a
    /// name that is not a valid contract name (lowercase ASCII, digits and
    /// `-`, starting with a letter).
    pub fn deploy<C>(
        &mut self,
        name: &str,
        contract: C,
    ) -> Result<ContractId, Error>
    where
        C: Contract + 'static,
    {
        if !valid_contract_name(name) {
            return Err(Error::SessionError(
                format!("invalid contract name: `{name}`").into(),
            ));
        }
        if !self.deployed.insert(name.to_string()) {
            return Err(Error::ContractAlreadyDeployed(name.to_string()));
        }

        let deployer = self.vm.accounts().deployer();
        let id = ContractId::new(deployer, name);
        let logic: Arc<dyn Contract> = Arc::new(contract);
        self.vm.register(name, id.clone(), logic.clone());

        if !self.state.contracts.contains_key(name) {
            let snapshot = self.state.clone();
            self.state
                .contracts
                .insert(name.to_string(), ContractState::default());

            let result = {
                let mut env = SessionEnv::new(
                    &mut self.state,
                    id.clone(),
                    deployer,
                    CallKind::Public,
                    self.gas_limit,
                );
                env.charge(CALL_BASE_COST)
                    .and_then(|()| logic.init(&mut env))
            };

            if let Err(err) = result {
                self.state = snapshot;
                self.deployed.remove(name);
                return Err(err.into());
            }
        }

        tracing::debug!(contract = name, "contract deployed");
        Ok(id)
    }

    /// Executes a public function on the current state of this session.
    ///
    /// Calls are atomic: a contract error rolls the state back and surfaces
    /// as an [`Error`], while an `(err …)` response also rolls the state
    /// back but is a successful host call whose receipt carries the
    /// response. Either way a failed call emits no events.
    pub fn call_public_fn(
        &mut self,
        contract: &str,
        fn_name: &str,
        args: &[Value],
        sender: Principal,
    ) -> Result<CallReceipt, Error> {
        let (id, logic) = self.entry(contract)?;
        tracing::trace!(contract, function = fn_name, "public call");

        let snapshot = self.state.clone();
        let (result, events, gas_spent) = {
            let mut env = SessionEnv::new(
                &mut self.state,
                id,
                sender,
                CallKind::Public,
                self.gas_limit,
            );
            let result = env
                .charge(CALL_BASE_COST)
                .and_then(|()| logic.call_public(&mut env, fn_name, args));
            let (events, gas_spent) = env.finish();
            (result, events, gas_spent)
        };

        let result = match result {
            Ok(value) => value,
            Err(err) => {
                self.state = snapshot;
                return Err(err.into());
            }
        };
        if !matches!(result, Value::Response { .. }) {
            self.state = snapshot;
            return Err(Error::SessionError(
                format!("public function `{fn_name}` did not return a response")
                    .into(),
            ));
        }

        let mut events = events;
        if !result.is_ok() {
            self.state = snapshot;
            events.clear();
        }

        Ok(CallReceipt {
            gas_limit: self.gas_limit,
            gas_spent,
            events,
            result,
        })
    }

    /// Executes a read-only function on the current state of this session.
    ///
    /// Read-only calls cannot mutate state or emit events; a contract
    /// attempting either fails with a read-only violation.
    pub fn call_read_only_fn(
        &mut self,
        contract: &str,
        fn_name: &str,
        args: &[Value],
        sender: Principal,
    ) -> Result<Value, Error> {
        let (id, logic) = self.entry(contract)?;
        tracing::trace!(contract, function = fn_name, "read-only call");

        let result = {
            let mut env = SessionEnv::new(
                &mut self.state,
                id,
                sender,
                CallKind::ReadOnly,
                self.gas_limit,
            );
            env.charge(CALL_BASE_COST)
                .and_then(|()| logic.call_read_only(&mut env, fn_name, args))
        };

        result.map_err(Into::into)
    }

    /// The account owned by the deployed contract `name`.
    pub fn contract_principal(
        &self,
        contract: &str,
    ) -> Result<Principal, Error> {
        let (id, _) = self.entry(contract)?;
        Ok(derive_principal(&id.to_string()))
    }

    /// The balance of the given account in the session's state.
    pub fn balance(&self, owner: &Principal) -> u128 {
        self.state.balance(owner)
    }

    /// The height of the chain in the session's state.
    pub fn block_height(&self) -> u64 {
        self.state.block_height
    }

    /// Mines `count` empty blocks.
    pub fn advance_block(&mut self, count: u64) {
        self.state.block_height += count;
    }

    /// Overrides the gas budget for subsequent calls.
    pub fn set_gas_limit(&mut self, gas_limit: u64) {
        self.gas_limit = gas_limit;
    }

    /// Return the root of the current state of the session.
    ///
    /// The root is a hash over the canonical serialization of the whole
    /// chain state. It also doubles as the ID of a commit - the commit root.
    pub fn root(&self) -> Result<[u8; 32], Error> {
        self.state.root()
    }

    /// Commits the session, consuming it and publishing its state as the
    /// VM's new head. Returns the state root.
    pub fn commit(self) -> Result<[u8; 32], Error> {
        let root = self.state.root()?;
        self.vm.add_commit(root, self.state);

        tracing::debug!(root = %hex::encode(root), "session committed");
        Ok(root)
    }

    /// Resets the session's working state to the given commit.
    pub fn restore(&mut self, root: &[u8; 32]) -> Result<(), Error> {
        self.state = self
            .vm
            .commit_state(root)
            .ok_or_else(|| Error::UnknownCommit(hex::encode(root)))?;
        Ok(())
    }

    fn entry(
        &self,
        contract: &str,
    ) -> Result<(ContractId, Arc<dyn Contract>), Error> {
        let entry = self
            .vm
            .contract_entry(contract)
            .ok_or_else(|| Error::ContractDoesNotExist(contract.to_string()))?;

        // logic may be registered while the session's state predates the
        // contract, e.g. after restoring an old commit
        if !self.state.contracts.contains_key(contract) {
            return Err(Error::ContractDoesNotExist(contract.to_string()));
        }

        Ok(entry)
    }
}

fn valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
