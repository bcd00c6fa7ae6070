//! Trigger payload parsing.

use serde_json::{Map, Value};

use crate::CoreError;

/// Parse a payload given on the command line.
///
/// `null` is treated the same as no payload at all.
pub fn parse_payload(raw: &str) -> Result<Value, CoreError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CoreError::InvalidPayload(e.to_string()))?;
    Ok(match value {
        Value::Null => empty_payload(),
        other => other,
    })
}

/// The payload sent when none is supplied.
pub fn empty_payload() -> Value {
    Value::Object(Map::new())
}
