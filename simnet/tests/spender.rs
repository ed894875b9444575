// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use simnet::{ContractError, Error, Value, DEFAULT_GAS_LIMIT, VM};
use tpp::Tpp;

#[test]
fn calls_spend_gas() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let donor = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("tpp", Tpp)?;

    let receipt = session.call_public_fn(
        "tpp",
        "make-donation",
        &[Value::uint(1000), Value::string_ascii("Education Fund")?],
        donor,
    )?;

    assert_eq!(receipt.gas_limit, DEFAULT_GAS_LIMIT);
    assert!(receipt.gas_spent > 0);
    assert!(receipt.gas_spent <= receipt.gas_limit);

    Ok(())
}

#[test]
fn out_of_gas_aborts_and_rolls_back() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let donor = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("tpp", Tpp)?;

    session.set_gas_limit(150);
    let err = session
        .call_public_fn(
            "tpp",
            "make-donation",
            &[Value::uint(1000), Value::string_ascii("Education Fund")?],
            donor,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ContractError(ContractError::OutOfGas)
    ));

    // nothing was counted, and the funds never moved
    session.set_gas_limit(DEFAULT_GAS_LIMIT);
    assert_eq!(
        session.call_read_only_fn(
            "tpp",
            "get-donor-donation-count",
            &[Value::principal(donor)],
            donor,
        )?,
        Value::ok(Value::uint(0))
    );
    assert_eq!(
        session.balance(&donor),
        simnet::GENESIS_BALANCE
    );

    Ok(())
}

#[test]
fn read_only_calls_are_metered_too() -> Result<(), Error> {
    let mut vm = VM::ephemeral()?;
    let donor = vm.accounts().get("wallet_1").expect("wallet_1 exists");

    let mut session = vm.session();
    session.deploy("tpp", Tpp)?;

    session.set_gas_limit(10);
    let err = session
        .call_read_only_fn(
            "tpp",
            "get-donor-donation-count",
            &[Value::principal(donor)],
            donor,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ContractError(ContractError::OutOfGas)
    ));

    Ok(())
}
