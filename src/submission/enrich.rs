use std::net::IpAddr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

pub const SUBMITTED_AT: &str = "submittedAt";
pub const SUBMITTED_FROM: &str = "submittedFrom";

/// Append server-assigned metadata to a decoded submission.
///
/// Server values win: a client-supplied `submittedAt` or `submittedFrom` is
/// overwritten.
pub fn apply(
    mut record: Map<String, Value>,
    peer: IpAddr,
    received_at: DateTime<Utc>,
) -> Map<String, Value> {
    record.insert(
        SUBMITTED_AT.to_string(),
        Value::String(received_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    record.insert(SUBMITTED_FROM.to_string(), Value::String(peer.to_string()));
    record
}
