// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::{tempdir, TempDir};

use simnet_uplink::{Contract, ContractId};

use crate::accounts::{Accounts, GENESIS_BALANCE};
use crate::session::Session;
use crate::state::ChainState;
use crate::Error::{self, PersistenceError};

const COMMITS_FILENAME: &str = "commits";

/// The commit store as laid out on disk.
#[derive(Default, Serialize, Deserialize)]
struct CommitIndex {
    head: Option<String>,
    commits: BTreeMap<String, ChainState>,
}

pub(crate) struct ContractEntry {
    pub id: ContractId,
    pub logic: Arc<dyn Contract>,
}

struct VMInner {
    contracts: BTreeMap<String, ContractEntry>,
    accounts: Accounts,
    head: ChainState,
    commits: BTreeMap<String, ChainState>,
    base_path: PathBuf,
    // keeps the backing directory of an ephemeral VM alive
    _ephemeral_dir: Option<TempDir>,
}

impl VMInner {
    fn new(base_path: PathBuf, ephemeral_dir: Option<TempDir>) -> Result<Self, Error> {
        let accounts = Accounts::genesis();

        let balances = accounts
            .iter()
            .map(|(_, principal)| (principal, GENESIS_BALANCE))
            .collect();

        let mut inner = Self {
            contracts: BTreeMap::new(),
            accounts,
            head: ChainState::genesis(balances),
            commits: BTreeMap::new(),
            base_path,
            _ephemeral_dir: ephemeral_dir,
        };
        inner.load_commits()?;

        Ok(inner)
    }

    fn load_commits(&mut self) -> Result<(), Error> {
        let path = self.base_path.join(COMMITS_FILENAME);
        if !path.exists() {
            return Ok(());
        }

        let bytes = std::fs::read(path)
            .map_err(|err| PersistenceError(Arc::new(err)))?;
        let index: CommitIndex = serde_json::from_slice(&bytes)?;

        self.commits = index.commits;
        if let Some(head) = index.head {
            if let Some(state) = self.commits.get(&head) {
                self.head = state.clone();
            }
        }

        tracing::debug!(commits = self.commits.len(), "commit index loaded");
        Ok(())
    }
}

/// The simnet virtual machine.
///
/// A `VM` owns the contract logic registered with it, the genesis account
/// set, and the store of committed chain states. It is spawned either
/// [`ephemeral`]ly, backed by a temporary directory, or with [`new`] on a
/// directory holding a previously [`persist`]ed commit store.
///
/// [`ephemeral`]: VM::ephemeral
/// [`new`]: VM::new
/// [`persist`]: VM::persist
#[derive(Clone)]
pub struct VM {
    inner: Arc<RwLock<VMInner>>,
}

impl VM {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        P: Into<PathBuf>,
    {
        Ok(VM {
            inner: Arc::new(RwLock::new(VMInner::new(path.into(), None)?)),
        })
    }

    pub fn ephemeral() -> Result<Self, Error> {
        let dir = tempdir().map_err(|err| PersistenceError(Arc::new(err)))?;
        Ok(VM {
            inner: Arc::new(RwLock::new(VMInner::new(
                dir.path().into(),
                Some(dir),
            )?)),
        })
    }

    /// The fixture accounts the network was born with.
    pub fn accounts(&self) -> Accounts {
        self.inner.read().accounts.clone()
    }

    /// Spawns a session at the current head state.
    pub fn session(&mut self) -> Session {
        Session::new(self.clone())
    }

    /// Writes the commit store to the VM's backing directory.
    pub fn persist(&self) -> Result<(), Error> {
        let guard = self.inner.read();

        let head = guard.head.root()?;
        let index = CommitIndex {
            head: Some(hex::encode(head)),
            commits: guard.commits.clone(),
        };

        let bytes = serde_json::to_vec(&index)?;
        let path = guard.base_path.join(COMMITS_FILENAME);
        std::fs::write(path, bytes)
            .map_err(|err| PersistenceError(Arc::new(err)))?;

        tracing::debug!(commits = guard.commits.len(), "commit index persisted");
        Ok(())
    }

    pub fn base_path(&self) -> PathBuf {
        self.inner.read().base_path.to_path_buf()
    }

    pub(crate) fn register(
        &self,
        name: &str,
        id: ContractId,
        logic: Arc<dyn Contract>,
    ) {
        // This should be the only place that we need a write lock for
        // contract logic.
        let mut guard = self.inner.write();
        guard.contracts.insert(name.to_string(), ContractEntry { id, logic });
    }

    pub(crate) fn contract_entry(
        &self,
        name: &str,
    ) -> Option<(ContractId, Arc<dyn Contract>)> {
        let guard = self.inner.read();
        guard
            .contracts
            .get(name)
            .map(|entry| (entry.id.clone(), entry.logic.clone()))
    }

    pub(crate) fn head(&self) -> ChainState {
        self.inner.read().head.clone()
    }

    pub(crate) fn add_commit(&self, root: [u8; 32], state: ChainState) {
        let mut guard = self.inner.write();
        guard.commits.insert(hex::encode(root), state.clone());
        guard.head = state;
    }

    pub(crate) fn commit_state(&self, root: &[u8; 32]) -> Option<ChainState> {
        self.inner.read().commits.get(&hex::encode(root)).cloned()
    }
}
