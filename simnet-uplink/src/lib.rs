// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Types and traits shared between the `simnet` virtual machine and the
//! native contracts it hosts.
//!
//! Contracts are plain Rust types implementing the [`Contract`] trait. They
//! exchange dynamically typed [`Value`]s with their callers and reach chain
//! state exclusively through the [`TxEnv`] handle the host passes into every
//! call.

mod contract;
pub use contract::*;

mod types;
pub use types::*;

mod value;
pub use value::*;

mod error;
pub use error::*;

mod serde_support;
