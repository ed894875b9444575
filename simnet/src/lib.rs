// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A simulated network for running native smart contracts.
//!
//! A [`VM`] owns registered contract logic, a deterministic set of fixture
//! accounts, and a store of committed chain states. [`Session`]s are spawned
//! from it to deploy contracts and call into them; their mutations become
//! visible to later sessions only once [`commit`]ed.
//!
//! [`commit`]: Session::commit

mod accounts;
mod error;
mod session;
mod session_env;
mod state;
mod vm;

pub use accounts::{Accounts, GENESIS_BALANCE};
pub use error::Error;
pub use session::{CallReceipt, Session, DEFAULT_GAS_LIMIT};
pub use vm::VM;

// re-exports

pub use simnet_uplink::{
    Contract, ContractError, ContractId, Event, Principal, TxEnv, Value,
};
