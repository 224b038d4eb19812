use {
    anyhow::{Context, Result, bail},
    mwdict::{
        Lookup,
        note::{NoteContent, build_note},
    },
    mwdict_ankiconnect::{
        client::{AnkiClient, DEFAULT_URL},
        request::{
            AddNote, Asset, DeckName, DeckNames, ModelFieldName, ModelFieldNames, ModelName,
            ModelNames, Note, NoteId, NoteOptions,
        },
    },
    tracing::debug,
};

/// Tag added to every created note.
const NOTE_TAG: &str = "mwdict";

#[derive(Debug, clap::Args)]
pub struct AnkiArgs {
    /// Also add the word as a note through AnkiConnect
    #[arg(long)]
    pub anki: bool,
    /// URL AnkiConnect listens on
    #[arg(long, default_value = DEFAULT_URL)]
    pub anki_url: String,
    /// AnkiConnect API key
    #[arg(long)]
    pub anki_key: Option<String>,
    /// Deck to add the note to
    #[arg(long, default_value = "Default")]
    pub deck: String,
    /// Note type of the note
    #[arg(long, default_value = "Basic")]
    pub model: String,
    /// Field to write the word and its sound tags to
    #[arg(long, default_value = "Front")]
    pub word_field: String,
    /// Field to write the rendered entries to
    #[arg(long, default_value = "Back")]
    pub definition_field: String,
}

pub async fn add_note(args: &AnkiArgs, word: &str, lookup: &Lookup) -> Result<NoteId> {
    let http_client = reqwest::Client::builder()
        .build()
        .context("failed to create HTTP client")?;
    let client = AnkiClient::new(http_client, &args.anki_url, args.anki_key.clone());
    let version = client.check_version().await?;
    debug!(version, "Connected to AnkiConnect");

    let decks = client
        .send(&DeckNames)
        .await
        .context("failed to get deck names")?;
    if !decks.contains(&DeckName(args.deck.clone())) {
        bail!("deck {:?} does not exist", args.deck);
    }
    let models = client
        .send(&ModelNames)
        .await
        .context("failed to get note types")?;
    let model_name = ModelName(args.model.clone());
    if !models.contains(&model_name) {
        bail!("note type {:?} does not exist", args.model);
    }
    let fields = client
        .send(&ModelFieldNames { model_name })
        .await
        .context("failed to get note type fields")?;
    for field in [&args.word_field, &args.definition_field] {
        if !fields.contains(&ModelFieldName(field.clone())) {
            bail!("note type {:?} has no field {field:?}", args.model);
        }
    }

    let note = to_note(args, build_note(word, lookup));
    client
        .send(&AddNote { note })
        .await
        .context("failed to add note")
}

fn to_note(args: &AnkiArgs, content: NoteContent) -> Note {
    Note {
        deck_name: args.deck.clone(),
        model_name: args.model.clone(),
        fields: [
            (args.word_field.clone(), content.word_field),
            (args.definition_field.clone(), content.definition_field),
        ]
        .into_iter()
        .collect(),
        options: NoteOptions::default(),
        tags: vec![NOTE_TAG.to_owned()],
        audio: content
            .audio
            .into_iter()
            .map(|audio| Asset {
                url: audio.url,
                filename: audio.filename,
                fields: Vec::new(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, mwdict::note::AudioRef};

    #[test]
    fn note_from_content() {
        let args = <crate::Args as clap::Parser>::try_parse_from([
            "mwdict",
            "--anki",
            "--deck",
            "Words",
            "--definition-field",
            "Meaning",
            "run",
        ])
        .unwrap()
        .anki;
        let audio = AudioRef::from_url("https://example.com/r/run00001.wav");
        let content = NoteContent {
            word_field: format!("run {}", audio.sound_tag()),
            definition_field: "<b>verb</b>".into(),
            audio: vec![audio],
        };

        let note = to_note(&args, content);
        assert_eq!(note.deck_name, "Words");
        assert_eq!(note.model_name, "Basic");
        assert_eq!(note.fields["Front"], "run [sound:run00001.wav]");
        assert_eq!(note.fields["Meaning"], "<b>verb</b>");
        assert_eq!(note.tags, ["mwdict"]);
        assert_eq!(
            note.audio,
            [Asset {
                url: "https://example.com/r/run00001.wav".into(),
                filename: "run00001.wav".into(),
                fields: Vec::new(),
            }]
        );
    }
}
