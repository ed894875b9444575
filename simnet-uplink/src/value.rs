// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ContractError, Principal};

/// A dynamically typed value exchanged between callers, contracts and the
/// chain datastore.
///
/// The `Display` implementation renders the canonical literal form of a
/// value - `u5`, `-3`, `"text"`, `'S…`, `(some v)`, `(tuple (k v))`,
/// `(ok v)`. The rendering is injective and doubles as the datastore's map
/// key encoding, so two values compare equal exactly when their literals do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Uint(u128),
    Int(i128),
    Bool(bool),
    StringAscii(String),
    Principal(Principal),
    Optional(Option<Box<Value>>),
    Tuple(BTreeMap<String, Value>),
    Response { ok: bool, value: Box<Value> },
}

impl Value {
    /// An unsigned integer value.
    pub const fn uint(value: u128) -> Self {
        Self::Uint(value)
    }

    /// A signed integer value.
    pub const fn int(value: i128) -> Self {
        Self::Int(value)
    }

    /// An ASCII string value. The constructor is the only way to produce
    /// one, and it rejects non-ASCII data.
    pub fn string_ascii<S: Into<String>>(
        value: S,
    ) -> Result<Self, ContractError> {
        let value = value.into();
        if !value.is_ascii() {
            return Err(ContractError::NonAsciiString);
        }
        Ok(Self::StringAscii(value))
    }

    /// A principal value.
    pub const fn principal(principal: Principal) -> Self {
        Self::Principal(principal)
    }

    /// An optional holding `value`.
    pub fn some(value: Value) -> Self {
        Self::Optional(Some(Box::new(value)))
    }

    /// The empty optional.
    pub const fn none() -> Self {
        Self::Optional(None)
    }

    /// A tuple value from the given entries.
    pub fn tuple<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Tuple(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// A successful response wrapping `value`.
    pub fn ok(value: Value) -> Self {
        Self::Response {
            ok: true,
            value: Box::new(value),
        }
    }

    /// A failed response wrapping `value`.
    pub fn err(value: Value) -> Self {
        Self::Response {
            ok: false,
            value: Box::new(value),
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string_ascii(&self) -> Option<&str> {
        match self {
            Self::StringAscii(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_principal(&self) -> Option<&Principal> {
        match self {
            Self::Principal(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Tuple(entries) => Some(entries),
            _ => None,
        }
    }

    /// The value inside an optional: `None` for the empty optional, and
    /// `None` for values that are not optionals at all.
    pub fn as_optional(&self) -> Option<&Value> {
        match self {
            Self::Optional(Some(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether the value is a successful response.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Response { ok: true, .. })
    }

    /// Unwraps a successful response, yielding the wrapped value.
    ///
    /// # Panics
    /// Panics if the value is not an `(ok …)` response. Meant for test
    /// assertions.
    #[track_caller]
    pub fn expect_ok(self) -> Value {
        match self {
            Self::Response { ok: true, value } => *value,
            other => panic!("expected an (ok …) response, got {other}"),
        }
    }

    /// Unwraps a failed response, yielding the wrapped value.
    ///
    /// # Panics
    /// Panics if the value is not an `(err …)` response. Meant for test
    /// assertions.
    #[track_caller]
    pub fn expect_err(self) -> Value {
        match self {
            Self::Response { ok: false, value } => *value,
            other => panic!("expected an (err …) response, got {other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(value) => write!(f, "u{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::StringAscii(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Self::Principal(principal) => write!(f, "'{principal}"),
            Self::Optional(None) => f.write_str("none"),
            Self::Optional(Some(value)) => write!(f, "(some {value})"),
            Self::Tuple(entries) => {
                f.write_str("(tuple")?;
                for (key, value) in entries {
                    write!(f, " ({key} {value})")?;
                }
                f.write_str(")")
            }
            Self::Response { ok: true, value } => write!(f, "(ok {value})"),
            Self::Response { ok: false, value } => write!(f, "(err {value})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRINCIPAL_BYTES;

    #[test]
    fn canonical_literals() {
        let principal = Principal::from_bytes([0; PRINCIPAL_BYTES]);

        assert_eq!(Value::uint(5).to_string(), "u5");
        assert_eq!(Value::int(-3).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::none().to_string(), "none");
        assert_eq!(Value::some(Value::uint(1)).to_string(), "(some u1)");
        assert_eq!(Value::ok(Value::uint(0)).to_string(), "(ok u0)");
        assert_eq!(Value::err(Value::uint(2)).to_string(), "(err u2)");
        assert_eq!(
            Value::principal(principal).to_string(),
            format!("'{principal}")
        );
    }

    #[test]
    fn string_literals_escape_quotes() {
        let value = Value::string_ascii(r#"say "hi" \ bye"#).unwrap();
        assert_eq!(value.to_string(), r#""say \"hi\" \\ bye""#);
    }

    #[test]
    fn string_ascii_rejects_non_ascii() {
        assert_eq!(
            Value::string_ascii("café"),
            Err(ContractError::NonAsciiString)
        );
    }

    #[test]
    fn tuples_render_keys_in_order() {
        let tuple = Value::tuple([
            ("b", Value::uint(2)),
            ("a", Value::uint(1)),
        ]);
        assert_eq!(tuple.to_string(), "(tuple (a u1) (b u2))");
    }

    #[test]
    fn response_helpers() {
        assert!(Value::ok(Value::uint(0)).is_ok());
        assert!(!Value::err(Value::uint(1)).is_ok());
        assert_eq!(Value::ok(Value::uint(7)).expect_ok(), Value::uint(7));
        assert_eq!(Value::err(Value::uint(9)).expect_err(), Value::uint(9));
    }
}
