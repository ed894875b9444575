// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Contract implementing a transparent philanthropy platform. Donors give
//! toward a named cause; the contract escrows the funds on its own account,
//! records every donation, and keeps a per-donor donation count.

use simnet_uplink::{
    arg_principal, arg_string_ascii, arg_uint, Contract, ContractError,
    TxEnv, Value,
};

/// Funds could not be moved from the donor to the platform.
pub const ERR_TRANSFER_FAILED: u128 = 1;
/// Donations must carry a positive amount.
pub const ERR_ZERO_AMOUNT: u128 = 2;
/// The cause label exceeds [`MAX_CAUSE_LEN`].
pub const ERR_CAUSE_TOO_LONG: u128 = 3;

/// Longest accepted cause label, in characters.
pub const MAX_CAUSE_LEN: usize = 64;

const NEXT_DONATION_ID: &str = "next-donation-id";
const TOTAL_DONATED: &str = "total-donated";

const DONATION_COUNTS: &str = "donation-counts";
const DONATIONS: &str = "donations";

/// The transparent philanthropy platform contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tpp;

impl Tpp {
    fn make_donation(
        &self,
        env: &mut dyn TxEnv,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        let amount = arg_uint("make-donation", args, 0)?;
        let cause = arg_string_ascii("make-donation", args, 1)?.to_string();

        if amount == 0 {
            return Ok(Value::err(Value::uint(ERR_ZERO_AMOUNT)));
        }
        if cause.len() > MAX_CAUSE_LEN {
            return Ok(Value::err(Value::uint(ERR_CAUSE_TOO_LONG)));
        }

        let platform = env.contract_principal();
        match env.transfer(&platform, amount) {
            Ok(()) => {}
            Err(ContractError::InsufficientBalance { .. }) => {
                return Ok(Value::err(Value::uint(ERR_TRANSFER_FAILED)))
            }
            Err(err) => return Err(err),
        }

        let donor = env.sender();
        let donor_key = Value::principal(donor);

        let count = self.donation_count_of(env, &donor_key)?;
        let bumped = count
            .checked_add(1)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.map_insert(DONATION_COUNTS, &donor_key, Value::uint(bumped))?;

        let id = self.uint_var(env, NEXT_DONATION_ID)?;
        let next_id = id
            .checked_add(1)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.map_insert(
            DONATIONS,
            &Value::uint(id),
            Value::tuple([
                ("amount", Value::uint(amount)),
                ("cause", Value::string_ascii(cause.clone())?),
                ("donated-at", Value::uint(env.block_height().into())),
                ("donor", Value::principal(donor)),
            ]),
        )?;
        env.var_set(NEXT_DONATION_ID, Value::uint(next_id))?;

        let total = self.uint_var(env, TOTAL_DONATED)?;
        let total = total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.var_set(TOTAL_DONATED, Value::uint(total))?;

        env.emit(
            "donation",
            Value::tuple([
                ("amount", Value::uint(amount)),
                ("cause", Value::string_ascii(cause)?),
                ("donor", Value::principal(donor)),
                ("id", Value::uint(id)),
            ]),
        )?;

        // the donor's count as it stood before this donation
        Ok(Value::ok(Value::uint(count)))
    }

    fn get_donor_donation_count(
        &self,
        env: &mut dyn TxEnv,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        let donor = arg_principal("get-donor-donation-count", args, 0)?;
        let count =
            self.donation_count_of(env, &Value::principal(donor))?;
        Ok(Value::ok(Value::uint(count)))
    }

    fn get_donation(
        &self,
        env: &mut dyn TxEnv,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        let id = arg_uint("get-donation", args, 0)?;
        Ok(match env.map_get(DONATIONS, &Value::uint(id))? {
            Some(record) => Value::some(record),
            None => Value::none(),
        })
    }

    fn get_donation_count(
        &self,
        env: &mut dyn TxEnv,
    ) -> Result<Value, ContractError> {
        // donation IDs are dense, so the next ID is also the global count
        let next_id = self.uint_var(env, NEXT_DONATION_ID)?;
        Ok(Value::ok(Value::uint(next_id)))
    }

    fn get_total_donated(
        &self,
        env: &mut dyn TxEnv,
    ) -> Result<Value, ContractError> {
        let total = self.uint_var(env, TOTAL_DONATED)?;
        Ok(Value::ok(Value::uint(total)))
    }

    fn donation_count_of(
        &self,
        env: &mut dyn TxEnv,
        donor: &Value,
    ) -> Result<u128, ContractError> {
        Ok(env
            .map_get(DONATION_COUNTS, donor)?
            .and_then(|count| count.as_uint())
            .unwrap_or_default())
    }

    fn uint_var(
        &self,
        env: &mut dyn TxEnv,
        name: &str,
    ) -> Result<u128, ContractError> {
        Ok(env
            .var_get(name)?
            .and_then(|value| value.as_uint())
            .unwrap_or_default())
    }
}

impl Contract for Tpp {
    fn init(&self, env: &mut dyn TxEnv) -> Result<(), ContractError> {
        env.var_set(NEXT_DONATION_ID, Value::uint(0))?;
        env.var_set(TOTAL_DONATED, Value::uint(0))
    }

    fn call_public(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        match fn_name {
            "make-donation" => self.make_donation(env, args),
            _ => Err(ContractError::InvalidFunction(fn_name.to_string())),
        }
    }

    fn call_read_only(
        &self,
        env: &mut dyn TxEnv,
        fn_name: &str,
        args: &[Value],
    ) -> Result<Value, ContractError> {
        match fn_name {
            "get-donor-donation-count" => {
                self.get_donor_donation_count(env, args)
            }
            "get-donation" => self.get_donation(env, args),
            "get-donation-count" => self.get_donation_count(env),
            "get-total-donated" => self.get_total_donated(env),
            _ => Err(ContractError::InvalidFunction(fn_name.to_string())),
        }
    }
}
