// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;
use std::sync::Arc;

use thiserror::Error;

use simnet_uplink::ContractError;

/// The error type returned by the simnet VM.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Contract already deployed: {0}")]
    ContractAlreadyDeployed(String),
    #[error("Contract does not exist: {0}")]
    ContractDoesNotExist(String),
    #[error(transparent)]
    ContractError(ContractError),
    #[error(transparent)]
    PersistenceError(Arc<std::io::Error>),
    #[error(transparent)]
    SerializationError(Arc<serde_json::Error>),
    #[error("Session error: {0}")]
    SessionError(Cow<'static, str>),
    #[error("Unknown commit: {0}")]
    UnknownCommit(String),
}

impl From<ContractError> for Error {
    fn from(err: ContractError) -> Self {
        Self::ContractError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(Arc::new(err))
    }
}
