use serde_json::{Map, Value};

/// Parse a request body based on Content-Type header.
///
/// The submission must decode to a top-level key/value object; scalars and
/// arrays are rejected.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, String> {
    if body.is_empty() {
        return Err("No data received".to_string());
    }

    let ct = content_type.unwrap_or("application/json");

    let value = if ct.contains("application/json") {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)?
    } else {
        // Try JSON first, then form-urlencoded
        serde_json::from_slice(body)
            .map_err(|e| format!("Unable to parse body: {e}"))
            .or_else(|json_err| parse_form_urlencoded(body).map_err(|_| json_err))?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err("Expected a key/value document".to_string()),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    // Insert in wire order so the stored record keeps the form's field order.
    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_parses() {
        let map = parse_body(
            Some("application/json"),
            br#"{"firstName":"Jane","lastName":"Doe"}"#,
        )
        .unwrap();
        assert_eq!(map["firstName"], "Jane");
        assert_eq!(map["lastName"], "Doe");
    }

    #[test]
    fn json_array_is_rejected() {
        let err = parse_body(Some("application/json"), br#"[1,2,3]"#).unwrap_err();
        assert!(err.contains("key/value"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_body(Some("application/json"), b"not json at all").is_err());
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(parse_body(Some("application/json"), b"").is_err());
    }

    #[test]
    fn form_urlencoded_parses_in_order() {
        let map = parse_body(
            Some("application/x-www-form-urlencoded"),
            b"firstName=Jane&lastName=Doe&email=jane%40example.com",
        )
        .unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["firstName", "lastName", "email"]);
        assert_eq!(map["email"], "jane@example.com");
    }

    #[test]
    fn missing_content_type_falls_back_to_json() {
        let map = parse_body(None, br#"{"a":"b"}"#).unwrap();
        assert_eq!(map["a"], "b");
    }
}
