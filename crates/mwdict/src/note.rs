//! Builds flashcard note content from a [`Lookup`].
//!
//! A note has a word field and a definition field. Looking up a word replaces
//! the definition field with the rendered entries, and appends a sound tag to
//! the word field for every pronunciation, which plays the audio in Anki.

use {
    crate::Lookup,
    itertools::Itertools,
    regex::Regex,
    std::sync::LazyLock,
};

/// Separator between the rendered entries in a definition field.
pub const ENTRY_SEPARATOR: &str = "<br><br>";

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket regex should be valid"));

/// Gets the word to look up from the contents of a word field.
///
/// This strips every `[...]` group, such as sound tags added by a previous
/// lookup, and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use mwdict::note::clean_word;
///
/// assert_eq!(clean_word("run [sound:run00001.wav]"), "run");
/// ```
#[must_use]
pub fn clean_word(field: &str) -> String {
    BRACKETED.replace_all(field, "").trim().to_owned()
}

/// Audio file attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioRef {
    /// Where the file is downloaded from.
    pub url: String,
    /// Name of the file in the media collection.
    pub filename: String,
}

impl AudioRef {
    /// Creates a reference to `url`, named after the last segment of its path.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let filename = url.rsplit('/').next().unwrap_or(url);
        Self {
            url: url.to_owned(),
            filename: filename.to_owned(),
        }
    }

    /// Gets the tag which plays this file in a field.
    #[must_use]
    pub fn sound_tag(&self) -> String {
        format!("[sound:{}]", self.filename)
    }
}

/// Field contents of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    /// Looked up word, followed by a sound tag per audio file.
    pub word_field: String,
    /// HTML of every rendered entry.
    pub definition_field: String,
    /// Audio files referenced by [`NoteContent::word_field`].
    pub audio: Vec<AudioRef>,
}

/// Builds note content for `word` from its lookup.
///
/// Entries which failed to parse or render are left out.
#[must_use]
pub fn build_note(word: &str, lookup: &Lookup) -> NoteContent {
    let definition_field = lookup
        .rendered()
        .map(|definition| definition.doc.to_html().into_string())
        .join(ENTRY_SEPARATOR);
    let audio = lookup
        .audio
        .iter()
        .map(|url| AudioRef::from_url(url))
        .collect::<Vec<_>>();
    let word_field = if audio.is_empty() {
        word.to_owned()
    } else {
        format!("{word} {}", audio.iter().map(AudioRef::sound_tag).join(""))
    };
    NoteContent {
        word_field,
        definition_field,
        audio,
    }
}
