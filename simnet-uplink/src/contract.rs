// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::{ContractError, ContractId, Principal, Value};

/// The environment a contract call executes in.
///
/// Every chain effect a contract can have goes through this handle: reading
/// the transaction context, moving funds, touching its data vars and maps,
/// and emitting events. The host meters gas on each operation and refuses
/// mutations during read-only calls.
pub trait TxEnv {
    /// The principal that initiated the call.
    fn sender(&self) -> Principal;

    /// The ID of the contract being called.
    fn contract(&self) -> &ContractId;

    /// The account owned by the contract being called.
    fn contract_principal(&self) -> Principal;

    /// The height of the chain at the time of the call.
    fn block_height(&self) -> u64;

    /// The balance of the given account.
    fn balance(&self, owner: &Principal) -> u128;

    /// Transfers `amount` from the sender's account to `to`.
    fn transfer(
        &mut self,
        to: &Principal,
        amount: u128,
    ) -> Result<(), ContractError>;

    /// Reads a data var of the contract being called.
    fn var_get(&mut self, name: &str)
        -> Result<Option<Value>, ContractError>;

    /// Writes a data var of the contract being called.
    fn var_set(
        &mut self,
        name: &str,
        value: Value,
    ) -> Result<(), ContractError>;

    /// Reads an entry of one of the contract's data maps.
    fn map_get(
        &mut self,
        map: &str,
        key: &Value,
    ) -> Result<Option<Value>, ContractError>;

    /// Inserts an entry into one of the contract's data maps, replacing any
    /// previous entry under the same key.
    fn map_insert(
        &mut self,
        map: &str,
        key: &Value,
        value: Value,
    ) -> Result<(), ContractError>;

    /// Emits an event from the contract being called.
    fn emit(&mut self, topic: &str, data: Value)
        -> Result<(), ContractError>;
}

/// A native contract hosted by the virtual machine.
///
/// Functions are dispatched by name with positional [`Value`] arguments, the
/// way external callers address a deployed contract. Public functions must
/// return a response value - `(ok …)` commits the call's effects, `(err …)`
/// reports failure to the caller and rolls them back.
pub trait Contract: Send + Sync {
    /// Run once when the contract's state is first created, before any call
    /// is dispatched. The default does nothing.
    fn init(&self, env: &mut dyn TxEnv) -> Result<(), ContractError> {
        let _ = env;
        Ok(())
    }

    /// Executes a public function of the contract.
    fn call_public(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError>;

    /// Executes a read-only function of the contract.
    fn call_read_only(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError>;
}

fn arg<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
    expected: &'static str,
) -> Result<&'a Value, ContractError> {
    args.get(index).ok_or_else(|| ContractError::BadArgument {
        function: function.into(),
        index,
        expected,
    })
}

/// Decodes the unsigned integer at position `index` of a call's arguments.
pub fn arg_uint(
    function: &str,
    args: &[Value],
    index: usize,
) -> Result<u128, ContractError> {
    arg(function, args, index, "uint")?.as_uint().ok_or_else(|| {
        ContractError::BadArgument {
            function: function.into(),
            index,
            expected: "uint",
        }
    })
}

/// Decodes the ASCII string at position `index` of a call's arguments.
pub fn arg_string_ascii<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, ContractError> {
    arg(function, args, index, "string-ascii")?
        .as_string_ascii()
        .ok_or_else(|| ContractError::BadArgument {
            function: function.into(),
            index,
            expected: "string-ascii",
        })
}

/// Decodes the principal at position `index` of a call's arguments.
pub fn arg_principal(
    function: &str,
    args: &[Value],
    index: usize,
) -> Result<Principal, ContractError> {
    arg(function, args, index, "principal")?
        .as_principal()
        .copied()
        .ok_or_else(|| ContractError::BadArgument {
            function: function.into(),
            index,
            expected: "principal",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_decode_by_position() {
        let args = [Value::uint(1000), Value::string_ascii("cause").unwrap()];

        assert_eq!(arg_uint("make-donation", &args, 0), Ok(1000));
        assert_eq!(arg_string_ascii("make-donation", &args, 1), Ok("cause"));
    }

    #[test]
    fn arg_mismatch_reports_function_and_position() {
        let args = [Value::uint(1000)];

        let err = arg_principal("make-donation", &args, 0).unwrap_err();
        assert_eq!(
            err,
            ContractError::BadArgument {
                function: "make-donation".into(),
                index: 0,
                expected: "principal",
            }
        );

        // missing argument reports the same way as a mistyped one
        let err = arg_uint("make-donation", &args, 1).unwrap_err();
        assert_eq!(
            err,
            ContractError::BadArgument {
                function: "make-donation".into(),
                index: 1,
                expected: "uint",
            }
        );
    }
}
