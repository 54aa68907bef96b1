use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Placeholder for a missing or unusable applicant name field.
const NAME_PLACEHOLDER: &str = "Unknown";

/// Build the base file identifier for a submission: the receipt timestamp
/// truncated to whole seconds, then the applicant's first and last name.
pub fn base_name(received_at: DateTime<Utc>, record: &Map<String, Value>) -> String {
    let first = name_field(record, "firstName");
    let last = name_field(record, "lastName");
    format!("{}_{first}_{last}", received_at.format("%Y%m%d_%H%M%S"))
}

/// Candidate filename for the nth collision attempt. Attempt 0 is the bare
/// base name; later attempts carry a numeric disambiguation suffix.
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{base}.json")
    } else {
        format!("{base}_{attempt}.json")
    }
}

/// Whether a client-supplied filename can only refer to a record inside the
/// store: a bare `.json` name with no path separators or NUL.
pub fn is_stored_name(name: &str) -> bool {
    !name.contains(['/', '\\', '\0']) && name.ends_with(".json") && name.len() > ".json".len()
}

fn name_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
}

/// Make a name fragment filesystem-safe: whitespace becomes underscores,
/// path separators and NUL are stripped.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '/' | '\\' | '\0' => None,
            c if c.is_whitespace() => Some('_'),
            c => Some(c),
        })
        .collect()
}
