#![doc = include_str!("../README.md")]

pub mod audio;
pub mod entry;
pub mod headword;
pub mod lookup;
pub mod note;
pub mod render;
pub mod running_text;
pub mod sense_number;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;

mod error;
mod wire;

pub use {
    entry::Entry,
    error::{ParseError, RenderError},
    headword::is_headword,
    lookup::{Definition, DefinitionError, Lookup, Response, lookup},
};

/// [`indexmap::IndexSet`] using the fast [`foldhash`] hasher.
pub type IndexSet<T> = indexmap::IndexSet<T, foldhash::fast::RandomState>;
