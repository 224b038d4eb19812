//! Picks out the entries which define a looked up word.

use {regex::Regex, serde_json::Value, tracing::trace};

/// Checks if `entry` defines `word` itself, rather than a phrase or a
/// related word which only mentions it.
///
/// This holds when the entry's `meta.id` is `word`, optionally followed by a
/// homograph number like `:2`. Entries without an ID are never headwords.
///
/// # Examples
///
/// ```
/// # use {mwdict::is_headword, serde_json::json};
/// assert!(is_headword("run", &json!({ "meta": { "id": "run:2" } })));
/// assert!(!is_headword("run", &json!({ "meta": { "id": "run-down" } })));
/// ```
#[must_use]
pub fn is_headword(word: &str, entry: &Value) -> bool {
    let Some(id) = entry.pointer("/meta/id").and_then(Value::as_str) else {
        trace!(word, "Entry has no ID");
        return false;
    };
    // escaped input always forms a valid pattern
    Regex::new(&format!(r"^{}(:\d+)?$", regex::escape(word))).is_ok_and(|re| re.is_match(id))
}
