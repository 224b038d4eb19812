//! Shape checks over raw API JSON.
//!
//! Nodes appear either as `[tag, payload]` pairs, or as values keyed by their
//! tag inside an object. These helpers turn a shape mismatch into a
//! [`ParseError`] naming the node being parsed.

use {
    crate::ParseError,
    serde_json::{Map, Value},
};

pub type Object = Map<String, Value>;

pub fn object<'a>(value: &'a Value, node: &'static str) -> Result<&'a Object, ParseError> {
    value.as_object().ok_or(ParseError::Malformed {
        node,
        expected: "an object",
    })
}

pub fn array<'a>(value: &'a Value, node: &'static str) -> Result<&'a [Value], ParseError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ParseError::Malformed {
            node,
            expected: "an array",
        })
}

pub fn string<'a>(value: &'a Value, node: &'static str) -> Result<&'a str, ParseError> {
    value.as_str().ok_or(ParseError::Malformed {
        node,
        expected: "a string",
    })
}

/// Names the JSON type of `value`.
pub const fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn field<'a>(
    object: &'a Object,
    node: &'static str,
    field: &'static str,
) -> Result<&'a Value, ParseError> {
    object
        .get(field)
        .ok_or(ParseError::MissingField { node, field })
}

/// Splits a `[tag, payload]` pair.
pub fn pair<'a>(value: &'a Value, node: &'static str) -> Result<(&'a str, &'a Value), ParseError> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(tag), payload]) => Ok((tag.as_str(), payload)),
        _ => Err(ParseError::Malformed {
            node,
            expected: "a `[tag, payload]` pair",
        }),
    }
}

/// Splits a `[tag, payload]` pair, requiring that the tag is `tag`.
pub fn tagged<'a>(value: &'a Value, tag: &'static str) -> Result<&'a Value, ParseError> {
    let (found, payload) = pair(value, tag)?;
    if found == tag {
        Ok(payload)
    } else {
        Err(ParseError::UnexpectedTag {
            expected: tag,
            found: found.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn pairs() {
        let value = json!(["vis", [{ "t": "x" }]]);
        let (tag, payload) = pair(&value, "vis").unwrap();
        assert_eq!(tag, "vis");
        assert!(payload.is_array());

        assert!(matches!(
            pair(&json!(["vis"]), "vis"),
            Err(ParseError::Malformed { node: "vis", .. })
        ));
        assert!(matches!(
            pair(&json!(["vis", [], []]), "vis"),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            pair(&json!([1, []]), "vis"),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn tag_mismatch() {
        assert!(matches!(
            tagged(&json!(["bs", {}]), "vis"),
            Err(ParseError::UnexpectedTag { expected: "vis", found }) if found == "bs"
        ));
    }

    #[test]
    fn missing_field() {
        let value = json!({ "sn": "1" });
        let object = object(&value, "sense").unwrap();
        assert!(matches!(
            field(object, "sense", "dt"),
            Err(ParseError::MissingField {
                node: "sense",
                field: "dt"
            })
        ));
    }
}
