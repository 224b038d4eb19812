#![doc = include_str!("../README.md")]

mod anki;
mod define;

use {
    anyhow::{Context as _, Result, bail},
    mwdict::{
        Response,
        client::Client,
        config::{self, Config},
        lookup,
        note::clean_word,
        render::Doc,
    },
    std::{path::PathBuf, process::ExitCode},
    tracing::{error, info, level_filters::LevelFilter},
    tracing_subscriber::EnvFilter,
};

/// Look up a word in the Merriam-Webster Collegiate Dictionary
#[derive(Debug, clap::Parser)]
#[command(version)]
struct Args {
    /// Word to look up
    word: String,
    /// Path to the config file
    #[arg(long, env = "MWDICT_CONFIG")]
    config: Option<PathBuf>,
    /// API key, overriding the config file
    #[arg(long, env = "MW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Directory to cache responses in, overriding the config file
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    /// Always query the API, without reading or writing cached responses
    #[arg(long)]
    no_cache: bool,
    /// How to print entries
    #[arg(long, value_enum, default_value_t = Format::Ansi)]
    format: Format,
    #[command(flatten)]
    anki: anki::AnkiArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    /// Unstyled text
    Plain,
    /// Text styled with terminal colors
    Ansi,
    /// HTML with inline styles
    Html,
}

impl Format {
    fn paint(self, doc: &Doc) -> String {
        match self {
            Self::Plain => doc.to_plain(),
            Self::Ansi => doc.to_ansi(),
            Self::Html => doc.to_html().into_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Found,
    EntryFailed,
    NotFound,
}

impl Outcome {
    const fn code(self) -> u8 {
        match self {
            Self::Found => 0,
            Self::EntryFailed => 2,
            Self::NotFound => 3,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(value: Outcome) -> Self {
        Self::from(value.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
    let args = <Args as clap::Parser>::parse();

    match run(args).await {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Outcome> {
    let config = load_config(&args).await?;
    let word = clean_word(&args.word);
    if word.is_empty() {
        bail!("no word to look up in {:?}", args.word);
    }

    let client = Client::new(&config).context("failed to create client")?;
    let response = client
        .fetch(&word)
        .await
        .with_context(|| format!("failed to fetch entries for {word:?}"))?;
    let entries = match Response::from_json(response).context("unexpected API response")? {
        Response::Entries(entries) => entries,
        Response::Suggestions(suggestions) => {
            define::print_suggestions(&word, &suggestions);
            return Ok(Outcome::NotFound);
        }
    };

    let lookup = lookup(&word, &entries);
    if lookup.is_empty() {
        info!("No entries found for {word:?}");
        return Ok(Outcome::NotFound);
    }
    define::print_lookup(&lookup, args.format);
    if lookup.errors().next().is_some() {
        if args.anki.anki {
            error!("Not adding a note, since some entries failed");
        }
        return Ok(Outcome::EntryFailed);
    }

    if args.anki.anki {
        let note_id = anki::add_note(&args.anki, &word, &lookup).await?;
        info!("Added note {} for {word:?}", note_id.0);
    }
    Ok(Outcome::Found)
}

async fn load_config(args: &Args) -> Result<Config> {
    let mut config = if let Some(path) = &args.config {
        Config::load(path).await?
    } else if let Some(path) = config::default_path() {
        Config::load_or_default(&path).await?
    } else {
        Config::default()
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(cache_dir) = &args.cache_dir {
        config.cache_dir = Some(cache_dir.clone());
    }
    if args.no_cache {
        config.cache = false;
    }
}
