//! Turns an API response into rendered definitions.

use {
    crate::{
        Entry, IndexSet, ParseError, RenderError, audio::extract_audio_links,
        headword::is_headword, render::Doc,
    },
    derive_more::{Display, Error},
    serde_json::Value,
    tracing::debug,
};

/// Body of a successful API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The word was found, and these are the raw entries mentioning it.
    Entries(Vec<Value>),
    /// The word was not found, but these similarly spelled words were.
    Suggestions(Vec<String>),
}

impl Response {
    /// Classifies a response body.
    ///
    /// An empty array is an empty list of entries.
    ///
    /// # Errors
    ///
    /// Errors if the body is not an array made up of only entry objects or
    /// only strings.
    pub fn from_json(value: Value) -> Result<Self, ParseError> {
        let malformed = || ParseError::Malformed {
            node: "response",
            expected: "an array of entry objects or of suggestion strings",
        };
        let Value::Array(items) = value else {
            return Err(malformed());
        };
        if items.iter().all(Value::is_object) {
            return Ok(Self::Entries(items));
        }
        items
            .into_iter()
            .map(|item| match item {
                Value::String(suggestion) => Ok(suggestion),
                _ => Err(malformed()),
            })
            .collect::<Result<_, _>>()
            .map(Self::Suggestions)
    }
}

/// Headword entry which was parsed and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Entry ID, e.g. `run:1`.
    pub id: String,
    /// Parsed entry.
    pub entry: Entry,
    /// Rendered entry.
    pub doc: Doc,
    /// Pronunciation audio links of this entry.
    pub audio: Vec<String>,
}

/// Failed to turn a headword entry into a [`Definition`].
#[derive(Debug, Display, Error)]
pub enum DefinitionError {
    /// Failed to parse the entry.
    #[display("failed to parse entry {id:?}: {source}")]
    Parse {
        /// Entry ID.
        id: String,
        /// Underlying error.
        source: ParseError,
    },
    /// Failed to render the entry.
    #[display("failed to render entry {id:?}: {source}")]
    Render {
        /// Entry ID.
        id: String,
        /// Underlying error.
        source: RenderError,
    },
}

impl DefinitionError {
    /// Gets the ID of the entry which failed.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Parse { id, .. } | Self::Render { id, .. } => id,
        }
    }
}

/// Headword entries of a word, each rendered independently.
#[derive(Debug)]
pub struct Lookup {
    /// One result per headword entry, in response order.
    pub definitions: Vec<Result<Definition, DefinitionError>>,
    /// Pronunciation audio links of every headword entry, without duplicates,
    /// in the order they were first seen.
    pub audio: Vec<String>,
}

impl Lookup {
    /// Checks if there were no headword entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over the entries which were rendered successfully.
    pub fn rendered(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter_map(|result| result.as_ref().ok())
    }

    /// Iterates over the entries which failed to parse or render.
    pub fn errors(&self) -> impl Iterator<Item = &DefinitionError> {
        self.definitions.iter().filter_map(|result| result.as_ref().err())
    }
}

/// Renders every entry in `entries` which is a headword entry for `word`.
///
/// An entry which fails to parse or render does not stop the others.
#[must_use]
pub fn lookup(word: &str, entries: &[Value]) -> Lookup {
    let mut audio = IndexSet::default();
    let definitions = entries
        .iter()
        .filter(|entry| {
            let headword = is_headword(word, entry);
            if !headword {
                debug!(id = ?entry.pointer("/meta/id"), "Skipping non-headword entry");
            }
            headword
        })
        .map(|entry| {
            audio.extend(extract_audio_links(entry));
            define(entry)
        })
        .collect();
    Lookup {
        definitions,
        audio: audio.into_iter().collect(),
    }
}

/// Parses and renders a single raw entry.
///
/// # Errors
///
/// Errors if the entry cannot be parsed or rendered.
pub fn define(entry: &Value) -> Result<Definition, DefinitionError> {
    let id = entry
        .pointer("/meta/id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let parsed = match Entry::parse(entry) {
        Ok(parsed) => parsed,
        Err(source) => return Err(DefinitionError::Parse { id, source }),
    };
    let doc = match parsed.render() {
        Ok(doc) => doc,
        Err(source) => return Err(DefinitionError::Render { id, source }),
    };
    Ok(Definition {
        id,
        entry: parsed,
        doc,
        audio: extract_audio_links(entry),
    })
}
