//! Response validation for the `{success, msg, obj}` envelope.
//!
//! A 2xx response is only a success when `success` is truthy. An absent,
//! null, `false`, zero or empty-string flag is a logical failure.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult};

pub const SUCCESS: &str = "success";
pub const MSG: &str = "msg";
pub const OBJ: &str = "obj";

/// A validated envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub msg: String,
    pub obj: Option<Value>,
}

impl Envelope {
    /// Parse and validate a raw body.
    pub fn validate(body: &[u8]) -> ApiResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedResponse(format!("body is not JSON: {}", e)))?;
        Self::validate_value(value)
    }

    pub fn validate_value(value: Value) -> ApiResult<Self> {
        let mut fields: Map<String, Value> = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ApiError::MalformedResponse(format!(
                    "expected a JSON object envelope, got {}",
                    kind(&other)
                )))
            }
        };

        let msg = match fields.remove(MSG) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        if !fields.get(SUCCESS).map(is_truthy).unwrap_or(false) {
            return Err(ApiError::Remote { message: msg });
        }

        let obj = match fields.remove(OBJ) {
            Some(Value::Null) | None => None,
            Some(obj) => Some(obj),
        };

        Ok(Self { msg, obj })
    }

    /// Deserialize `obj`, failing if it is absent.
    pub fn into_obj<T: DeserializeOwned>(self) -> ApiResult<T> {
        let obj = self
            .obj
            .ok_or_else(|| ApiError::MalformedResponse("response has no obj".to_string()))?;
        decode(obj)
    }

    /// Deserialize `obj`, mapping absent/null to `None`.
    pub fn into_optional_obj<T: DeserializeOwned>(self) -> ApiResult<Option<T>> {
        self.obj.map(decode).transpose()
    }
}

fn decode<T: DeserializeOwned>(obj: Value) -> ApiResult<T> {
    serde_json::from_value(obj).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
