//! Request parameter validation.
//!
//! Each field runs a short chain: presence, type, shape. The first failing
//! step decides the message and the rest of the chain is skipped.

use obol_crypto::{is_address, validate_signature_id, validate_swap_id};
use obol_types::Address;
use serde_json::Value;

use crate::RpcError;

pub const MISSED_ADDRESS: &str = "Missed address.";
pub const INVALID_ADDRESS: &str = "Address is not of a blockchain token type.";
pub const MISSED_ID: &str = "Missed id.";
pub const INVALID_BATCH_ID: &str = "Given batch id is not a valid.";
pub const INVALID_TRANSACTION_ID: &str = "Given transaction id is not a valid.";
pub const MISSED_SWAP_ID: &str = "Missed swap_id";
pub const INVALID_SWAP_ID: &str = "Incorrect atomic swap identifier.";
pub const INVALID_HEADER_SIGNATURE: &str = "Header signature is not of a blockchain token type.";
pub const INVALID_LIMIT: &str = "Invalid limit count.";
pub const INVALID_BLOCK_ID: &str = "Given block id is not a valid.";
pub const INVALID_REVERSE: &str = "Incorrect reverse identifier.";

/// Validation chain of one required string field.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub missing: &'static str,
    pub invalid: &'static str,
    /// Whether a numeric zero counts as absent rather than as a wrong type.
    pub zero_is_blank: bool,
    pub shape: fn(&str) -> bool,
}

pub const ADDRESS_RULE: FieldRule = FieldRule {
    missing: MISSED_ADDRESS,
    invalid: INVALID_ADDRESS,
    zero_is_blank: true,
    shape: is_address,
};

pub const BATCH_ID_RULE: FieldRule = FieldRule {
    missing: MISSED_ID,
    invalid: INVALID_BATCH_ID,
    zero_is_blank: false,
    shape: validate_signature_id,
};

pub const TRANSACTION_ID_RULE: FieldRule = FieldRule {
    invalid: INVALID_TRANSACTION_ID,
    ..BATCH_ID_RULE
};

pub const SWAP_ID_RULE: FieldRule = FieldRule {
    missing: MISSED_SWAP_ID,
    invalid: INVALID_SWAP_ID,
    zero_is_blank: true,
    shape: validate_swap_id,
};

/// Whether a JSON value counts as "not supplied".
///
/// `null`, empty or whitespace-only strings, and empty arrays or objects are
/// blank. `false` and numeric zero are blank only when `zero_is_blank`.
pub fn is_blank(value: Option<&Value>, zero_is_blank: bool) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => zero_is_blank && !flag,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Number(n)) => zero_is_blank && n.as_f64() == Some(0.0),
    }
}

/// Run `rule` against `params[field]`.
pub fn require(params: &Value, field: &str, rule: &FieldRule) -> Result<String, RpcError> {
    let value = params.get(field);
    if is_blank(value, rule.zero_is_blank) {
        return Err(RpcError::invalid(rule.missing));
    }
    match value {
        Some(Value::String(s)) if (rule.shape)(s) => Ok(s.clone()),
        _ => Err(RpcError::invalid(rule.invalid)),
    }
}

pub fn require_address(params: &Value, field: &str) -> Result<Address, RpcError> {
    let raw = require(params, field, &ADDRESS_RULE)?;
    Address::parse(&raw).map_err(|_| RpcError::invalid(INVALID_ADDRESS))
}

pub fn require_batch_id(params: &Value) -> Result<String, RpcError> {
    require(params, "id", &BATCH_ID_RULE)
}

pub fn require_transaction_id(params: &Value) -> Result<String, RpcError> {
    require(params, "id", &TRANSACTION_ID_RULE)
}

pub fn require_swap_id(params: &Value) -> Result<String, RpcError> {
    require(params, "swap_id", &SWAP_ID_RULE)
}

/// Filters accepted by transaction listing. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListTransactionsParams {
    pub ids: Option<Vec<String>>,
    pub start: Option<String>,
    pub limit: Option<u64>,
    pub head: Option<String>,
    /// Only `"false"` is accepted.
    pub reverse: Option<bool>,
}

impl ListTransactionsParams {
    /// Validate listing filters. Absent and `null` fields are skipped.
    pub fn parse(params: &Value) -> Result<Self, RpcError> {
        let field = |name: &str| params.get(name).filter(|value| !value.is_null());

        let ids = match field("ids") {
            None => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| signature_string(item, INVALID_HEADER_SIGNATURE))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(_) => return Err(RpcError::invalid(INVALID_HEADER_SIGNATURE)),
        };

        let start = field("start")
            .map(|value| signature_string(value, INVALID_HEADER_SIGNATURE))
            .transpose()?;

        let limit = field("limit")
            .map(|value| match value {
                Value::Number(n) => n.as_u64().ok_or_else(|| RpcError::invalid(INVALID_LIMIT)),
                _ => Err(RpcError::invalid(INVALID_LIMIT)),
            })
            .transpose()?;

        let head = field("head")
            .map(|value| signature_string(value, INVALID_BLOCK_ID))
            .transpose()?;

        let reverse = field("reverse")
            .map(|value| match value.as_str() {
                Some("false") => Ok(false),
                _ => Err(RpcError::invalid(INVALID_REVERSE)),
            })
            .transpose()?;

        Ok(Self {
            ids,
            start,
            limit,
            head,
            reverse,
        })
    }
}

fn signature_string(value: &Value, message: &'static str) -> Result<String, RpcError> {
    match value.as_str() {
        Some(s) if validate_signature_id(s) => Ok(s.to_string()),
        _ => Err(RpcError::invalid(message)),
    }
}
