//! Payload codec between the rollup server's hex strings and roster commands.
//!
//! Inbound payloads are `0x`-prefixed hex of UTF-8 text. Advance payloads hold
//! a JSON object with a `method` field, inspect payloads a `/`-separated route.

use serde::Deserialize;
use serde_json::Value;

use crate::entities::{Command, Query};
use crate::errors::{CodecError, CodecResult};

#[derive(Debug, Deserialize)]
struct CreateParams {
    name: String,
    age: u32,
    wallet_address: String,
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    wallet_address: String,
}

/// Hex payload (with or without `0x`) to UTF-8 text.
pub fn decode_payload(payload: &str) -> CodecResult<String> {
    let hex_digits = payload
        .strip_prefix("0x")
        .or_else(|| payload.strip_prefix("0X"))
        .unwrap_or(payload);
    let bytes = hex::decode(hex_digits)?;
    Ok(String::from_utf8(bytes)?)
}

/// Text to a `0x`-prefixed lowercase hex payload.
pub fn encode_payload(text: &str) -> String {
    format!("0x{}", hex::encode(text))
}

/// Parses an advance payload.
///
/// An absent or unrecognised `method` is `Command::Unknown`; invalid JSON or a
/// known method with missing parameters is a [`CodecError::MalformedCommand`].
pub fn parse_command(text: &str) -> CodecResult<Command> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CodecError::malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(CodecError::malformed("payload is not a JSON object"));
    }

    let method = value.get("method").and_then(Value::as_str).unwrap_or("");
    let command = match method {
        "create" => {
            let params: CreateParams = serde_json::from_value(value.clone())
                .map_err(|e| CodecError::malformed(format!("create: {e}")))?;
            Command::CreateRecord {
                name: params.name,
                age: params.age,
                wallet_address: params.wallet_address,
            }
        }
        "sign_attendance" => Command::MarkAttendance,
        "delete" => {
            let params: DeleteParams = serde_json::from_value(value.clone())
                .map_err(|e| CodecError::malformed(format!("delete: {e}")))?;
            Command::DeleteRecord {
                wallet_address: params.wallet_address,
            }
        }
        other => Command::Unknown {
            raw: other.to_string(),
        },
    };
    Ok(command)
}

pub fn parse_query_route(text: &str) -> Query {
    let mut segments = text.split('/');
    match (segments.next(), segments.next()) {
        (Some("all_students"), _) => Query::ListAll,
        (Some("student"), Some(address)) if !address.is_empty() => Query::GetByAddress {
            address: address.to_string(),
        },
        _ => Query::UnknownRoute {
            raw: text.to_string(),
        },
    }
}
