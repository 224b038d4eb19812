//! AnkiConnect actions.
//!
//! See [the action reference](https://git.sr.ht/~foosoft/anki-connect#supported-actions).

use {
    foldhash::HashMap,
    serde::{Deserialize, Serialize, de::DeserializeOwned},
};

/// Action which can be sent to AnkiConnect.
pub trait Request: Serialize {
    /// Result of the action.
    type Response: DeserializeOwned;

    /// Name of the action.
    const ACTION: &str;
    /// Whether this type is sent as the action's `params`.
    const HAS_PARAMS: bool;
}

/// Body of every AnkiConnect request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestWrapper<'r, R> {
    /// API version the request is written for.
    pub version: u32,
    /// Name of the action.
    pub action: &'r str,
    /// Parameters of the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'r R>,
    /// API key, if AnkiConnect is configured to require one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'r str>,
}

impl<'r, R: Request> RequestWrapper<'r, R> {
    /// Wraps `request` for the current [`VERSION`].
    ///
    /// [`VERSION`]: crate::VERSION
    #[must_use]
    pub fn new(request: &'r R, key: Option<&'r str>) -> Self {
        Self {
            version: crate::VERSION,
            action: R::ACTION,
            params: if R::HAS_PARAMS { Some(request) } else { None },
            key,
        }
    }
}

/// Gets the AnkiConnect API version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version;

impl Request for Version {
    type Response = u32;

    const ACTION: &str = "version";
    const HAS_PARAMS: bool = false;
}

/// Gets the names of all decks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckNames;

impl Request for DeckNames {
    type Response = Vec<DeckName>;

    const ACTION: &str = "deckNames";
    const HAS_PARAMS: bool = false;
}

/// Name of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckName(pub String);

/// Gets the names of all note types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelNames;

impl Request for ModelNames {
    type Response = Vec<ModelName>;

    const ACTION: &str = "modelNames";
    const HAS_PARAMS: bool = false;
}

/// Name of a note type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelName(pub String);

/// Gets the field names of a note type, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldNames {
    /// Note type to get the fields of.
    pub model_name: ModelName,
}

impl Request for ModelFieldNames {
    type Response = Vec<ModelFieldName>;

    const ACTION: &str = "modelFieldNames";
    const HAS_PARAMS: bool = true;
}

/// Name of a field in a note type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelFieldName(pub String);

/// Creates a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNote {
    /// Note to create.
    pub note: Note,
}

impl Request for AddNote {
    type Response = NoteId;

    const ACTION: &str = "addNote";
    const HAS_PARAMS: bool = true;
}

/// Contents of a new note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Deck to add the note to.
    pub deck_name: String,
    /// Note type of the note.
    pub model_name: String,
    /// Contents of each field, by field name.
    pub fields: HashMap<String, String>,
    /// How to handle duplicates.
    pub options: NoteOptions,
    /// Tags to add to the note.
    pub tags: Vec<String>,
    /// Audio files to download and attach.
    pub audio: Vec<Asset>,
}

/// Options for [`AddNote`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    /// Whether to add the note even if its first field matches an existing
    /// note's.
    pub allow_duplicate: bool,
    /// Where to look for duplicates, e.g. `deck`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_scope: Option<String>,
}

/// Media file attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Where AnkiConnect downloads the file from.
    pub url: String,
    /// Name of the file in the media collection.
    pub filename: String,
    /// Fields to append a reference to the file to.
    ///
    /// Leave this empty if the fields already reference the file.
    pub fields: Vec<String>,
}

/// ID of a created note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u64);

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn wrapper_without_params() {
        let body = serde_json::to_value(RequestWrapper::new(&Version, None)).unwrap();
        assert_eq!(body, json!({ "version": 6, "action": "version" }));
    }

    #[test]
    fn wrapper_with_params_and_key() {
        let request = ModelFieldNames {
            model_name: ModelName("Basic".into()),
        };
        let body = serde_json::to_value(RequestWrapper::new(&request, Some("secret"))).unwrap();
        assert_eq!(
            body,
            json!({
                "version": 6,
                "action": "modelFieldNames",
                "params": { "modelName": "Basic" },
                "key": "secret",
            })
        );
    }

    #[test]
    fn add_note() {
        let mut fields = HashMap::default();
        fields.insert("Front".to_owned(), "run [sound:run00001.wav]".to_owned());
        let request = AddNote {
            note: Note {
                deck_name: "Default".into(),
                model_name: "Basic".into(),
                fields,
                options: NoteOptions::default(),
                tags: vec!["mwdict".into()],
                audio: vec![Asset {
                    url: "https://example.com/run00001.wav".into(),
                    filename: "run00001.wav".into(),
                    fields: Vec::new(),
                }],
            },
        };
        let body = serde_json::to_value(RequestWrapper::new(&request, None)).unwrap();
        assert_eq!(
            body,
            json!({
                "version": 6,
                "action": "addNote",
                "params": {
                    "note": {
                        "deckName": "Default",
                        "modelName": "Basic",
                        "fields": { "Front": "run [sound:run00001.wav]" },
                        "options": { "allowDuplicate": false },
                        "tags": ["mwdict"],
                        "audio": [{
                            "url": "https://example.com/run00001.wav",
                            "filename": "run00001.wav",
                            "fields": [],
                        }],
                    },
                },
            })
        );
    }

    #[test]
    fn responses() {
        let decks = serde_json::from_value::<Vec<DeckName>>(json!(["Default", "Words"])).unwrap();
        assert_eq!(decks, [DeckName("Default".into()), DeckName("Words".into())]);
        let id = serde_json::from_value::<NoteId>(json!(1_496_198_395_707_u64)).unwrap();
        assert_eq!(id, NoteId(1_496_198_395_707));
    }
}
