// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use thiserror::Error;

/// The error possibly returned by a contract call.
///
/// A `ContractError` aborts the call: the host rolls the chain state back to
/// what it was before dispatch. Business-level failures a contract wants to
/// report to its caller are not errors in this sense - they are `(err …)`
/// response [`Value`]s returned through the `Ok` arm.
///
/// [`Value`]: crate::Value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("bad argument {index} to `{function}`: expected {expected}")]
    BadArgument {
        function: String,
        index: usize,
        expected: &'static str,
    },
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },
    #[error("invalid function: {0}")]
    InvalidFunction(String),
    #[error("string holds non-ascii data")]
    NonAsciiString,
    #[error("out of gas")]
    OutOfGas,
    #[error("panic: {0}")]
    Panic(String),
    #[error("state mutation in a read-only call: {0}")]
    ReadOnlyViolation(&'static str),
}
