//! Contract call model.
//!
//! Calls are named functions with typed arguments; the wallet bridge does
//! the ABI work. Argument and result values travel as JSON.

use serde_json::{json, Value};

use vaultops_types::{Address, TokenAmount};

use crate::error::ProviderError;

/// A single argument to a contract function.
#[derive(Clone, Debug, PartialEq)]
pub enum CallArg {
    Address(Address),
    /// Unsigned integer, serialized as a decimal string to survive JSON.
    Uint(u128),
    /// `0x`-prefixed hex byte string.
    Bytes(String),
    /// List of `0x`-prefixed hex byte strings.
    BytesList(Vec<String>),
}

impl CallArg {
    pub fn to_json(&self) -> Value {
        match self {
            CallArg::Address(a) => json!(a.as_str()),
            CallArg::Uint(v) => json!(v.to_string()),
            CallArg::Bytes(b) => json!(b),
            CallArg::BytesList(list) => json!(list),
        }
    }
}

impl From<&Address> for CallArg {
    fn from(a: &Address) -> Self {
        CallArg::Address(a.clone())
    }
}

impl From<TokenAmount> for CallArg {
    fn from(a: TokenAmount) -> Self {
        CallArg::Uint(a.raw())
    }
}

/// A contract function invocation: target, function name, arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractCall {
    pub contract: Address,
    pub function: String,
    pub args: Vec<CallArg>,
}

impl ContractCall {
    pub fn new(contract: &Address, function: impl Into<String>) -> Self {
        Self {
            contract: contract.clone(),
            function: function.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<CallArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// JSON body fragment understood by the wallet bridge.
    pub fn to_json(&self) -> Value {
        json!({
            "contract": self.contract.as_str(),
            "function": self.function,
            "args": self.args.iter().map(CallArg::to_json).collect::<Vec<_>>(),
        })
    }
}

/// The decoded result of a contract read, as returned by the bridge.
#[derive(Clone, Debug, PartialEq)]
pub struct CallValue(pub Value);

impl CallValue {
    /// Interpret the value as an unsigned integer.
    ///
    /// Accepts JSON numbers, decimal strings, and `0x`-hex strings —
    /// bridges differ in how they render uint256.
    pub fn as_u128(&self) -> Result<u128, ProviderError> {
        match &self.0 {
            Value::Number(n) => n
                .as_u64()
                .map(u128::from)
                .ok_or_else(|| ProviderError::InvalidResponse(format!("not a uint: {n}"))),
            Value::String(s) => {
                let s = s.trim();
                if let Some(hex_part) = s.strip_prefix("0x") {
                    u128::from_str_radix(hex_part, 16)
                } else {
                    s.parse()
                }
                .map_err(|_| ProviderError::InvalidResponse(format!("not a uint: {s}")))
            }
            other => Err(ProviderError::InvalidResponse(format!(
                "expected uint, got {other}"
            ))),
        }
    }

    pub fn as_amount(&self) -> Result<TokenAmount, ProviderError> {
        self.as_u128().map(TokenAmount::new)
    }

    pub fn as_address(&self) -> Result<Address, ProviderError> {
        match &self.0 {
            Value::String(s) => Address::parse(s)
                .map_err(|e| ProviderError::InvalidResponse(e.to_string())),
            other => Err(ProviderError::InvalidResponse(format!(
                "expected address, got {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> Result<&str, ProviderError> {
        self.0
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse(format!("expected string, got {}", self.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::parse("0xabcdef0123456789abcdef0123456789abcdef01").unwrap()
    }

    #[test]
    fn call_builder_collects_args() {
        let call = ContractCall::new(&addr(), "fundRewardVault")
            .arg(&addr())
            .arg(TokenAmount::new(100))
            .arg(CallArg::Uint(7))
            .arg(CallArg::Uint(0));
        assert_eq!(call.function, "fundRewardVault");
        assert_eq!(call.args.len(), 4);

        let body = call.to_json();
        assert_eq!(body["function"], "fundRewardVault");
        assert_eq!(body["args"][1], "100");
        assert_eq!(body["args"][2], "7");
    }

    #[test]
    fn value_as_u128_accepts_all_renderings() {
        assert_eq!(CallValue(serde_json::json!(42)).as_u128().unwrap(), 42);
        assert_eq!(CallValue(serde_json::json!("42")).as_u128().unwrap(), 42);
        assert_eq!(CallValue(serde_json::json!("0x2a")).as_u128().unwrap(), 42);
        assert!(CallValue(serde_json::json!(null)).as_u128().is_err());
        assert!(CallValue(serde_json::json!("forty-two")).as_u128().is_err());
    }

    #[test]
    fn value_as_address_validates() {
        let v = CallValue(serde_json::json!("0xABCDEF0123456789abcdef0123456789abcdef01"));
        assert_eq!(v.as_address().unwrap(), addr());
        assert!(CallValue(serde_json::json!("0x123")).as_address().is_err());
    }
}
