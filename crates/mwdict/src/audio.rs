//! Pronunciation audio links.
//!
//! See [the API docs](https://dictionaryapi.com/products/json#sec-2.prs).

use {serde_json::Value, tracing::debug};

/// Base URL which pronunciation audio files are served from.
pub const AUDIO_BASE_URL: &str = "https://media.merriam-webster.com/audio/prons/en/us/wav";

/// Gets the subdirectory under [`AUDIO_BASE_URL`] which an audio file is
/// filed under.
///
/// # Examples
///
/// ```
/// use mwdict::audio::subdirectory;
///
/// assert_eq!(subdirectory("bixeng01"), "bix");
/// assert_eq!(subdirectory("3d000001"), "number");
/// assert_eq!(subdirectory("run00001"), "r");
/// ```
#[must_use]
pub fn subdirectory(audio: &str) -> &str {
    if audio.starts_with("bix") {
        "bix"
    } else if audio.starts_with("gg") {
        "gg"
    } else {
        match audio.chars().next() {
            Some(c) if c.is_ascii_digit() || c == '_' => "number",
            Some(c) => &audio[..c.len_utf8()],
            None => "",
        }
    }
}

/// Gets the URL of an audio file by its base file name.
#[must_use]
pub fn audio_url(audio: &str) -> String {
    format!("{AUDIO_BASE_URL}/{}/{audio}.wav", subdirectory(audio))
}

/// Gets the URLs of every pronunciation of an entry's headword, in order.
///
/// Duplicates are kept. Pronunciations without an audio file are skipped.
#[must_use]
pub fn extract_audio_links(entry: &Value) -> Vec<String> {
    let Some(prs) = entry.pointer("/hwi/prs").and_then(Value::as_array) else {
        return Vec::new();
    };
    prs.iter()
        .filter_map(|pr| {
            let sound = pr.get("sound")?;
            match sound.get("audio").and_then(Value::as_str) {
                Some(audio) if !audio.is_empty() => Some(audio_url(audio)),
                _ => {
                    debug!(?sound, "Skipping pronunciation without an audio file");
                    None
                }
            }
        })
        .collect()
}
