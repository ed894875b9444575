// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use simnet::{
    Contract, ContractError, Error, Principal, Session, TxEnv, Value, VM,
};

/// Test double misbehaving in every way the host must defend against.
struct Wonky;

impl Contract for Wonky {
    fn call_public(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        let _ = args;
        match fn_name {
            "bump" => {
                let bumped = bump(env)?;
                Ok(Value::ok(Value::uint(bumped)))
            }
            "bump-then-abort" => {
                bump(env)?;
                Err(ContractError::Panic("deliberate abort".to_string()))
            }
            "bare" => Ok(Value::uint(1)),
            _ => Err(ContractError::InvalidFunction(fn_name.to_string())),
        }
    }

    fn call_read_only(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        let _ = args;
        match fn_name {
            "counter" => {
                let counter = env
                    .var_get("counter")?
                    .and_then(|value| value.as_uint())
                    .unwrap_or_default();
                Ok(Value::ok(Value::uint(counter)))
            }
            "sneaky-bump" => {
                let bumped = bump(env)?;
                Ok(Value::ok(Value::uint(bumped)))
            }
            _ => Err(ContractError::InvalidFunction(fn_name.to_string())),
        }
    }
}

fn bump(env: &mut dyn TxEnv) -> Result<u128, ContractError> {
    let counter = env
        .var_get("counter")?
        .and_then(|value| value.as_uint())
        .unwrap_or_default();
    let bumped = counter + 1;
    env.var_set("counter", Value::uint(bumped))?;
    Ok(bumped)
}

fn counter(session: &mut Session, caller: Principal) -> Result<Value, Error> {
    session.call_read_only_fn("wonky", "counter", &[], caller)
}

#[test]
fn contract_errors_roll_the_state_back() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let caller = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("wonky", Wonky)?;

    let receipt = session.call_public_fn("wonky", "bump", &[], caller)?;
    assert_eq!(receipt.result, Value::ok(Value::uint(1)));

    let err = session
        .call_public_fn("wonky", "bump-then-abort", &[], caller)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ContractError(ContractError::Panic(_))
    ));

    // the aborted call's bump was rolled back
    assert_eq!(counter(&mut session, caller)?, Value::ok(Value::uint(1)));

    Ok(())
}

#[test]
fn read_only_calls_cannot_mutate() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let caller = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("wonky", Wonky)?;

    let err = session
        .call_read_only_fn("wonky", "sneaky-bump", &[], caller)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ContractError(ContractError::ReadOnlyViolation("var-set"))
    ));

    assert_eq!(counter(&mut session, caller)?, Value::ok(Value::uint(0)));

    Ok(())
}

#[test]
fn public_functions_must_return_responses() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let caller = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("wonky", Wonky)?;

    let err = session
        .call_public_fn("wonky", "bare", &[], caller)
        .unwrap_err();
    assert!(matches!(err, Error::SessionError(_)));

    Ok(())
}
