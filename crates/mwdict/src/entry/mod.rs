//! Grammar of a dictionary entry's definition section.
//!
//! Each node is built from the raw JSON of its payload by a constructor named
//! after the payload's shape ([`Sense::parse`] for a bare payload,
//! [`BindingSubstitute::from_pair`] for a `[tag, payload]` pair,
//! [`DefiningText::from_elements`] for a list of pairs). Nodes then write
//! themselves into a [`DocWriter`] through [`WriteDoc`].
//!
//! Only the subset of the schema needed to render definitions is read. See
//! [the API docs](https://dictionaryapi.com/products/json) for the full
//! schema.

mod sense;
mod sequence;
mod text;

pub use {sense::*, sequence::*, text::*};

use {
    crate::{
        ParseError, RenderError,
        render::{Doc, DocWriter, Role, WriteDoc, write_lines},
        wire,
    },
    derive_more::From,
    serde_json::Value,
    tracing::debug,
};

/// Single dictionary entry: a headword, or a defined run-on phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Part of speech, e.g. `noun`.
    pub functional_label: String,
    /// Senses of this entry.
    pub definition: DefinitionSection,
}

impl Entry {
    /// Builds from an entry object of an API response.
    ///
    /// # Errors
    ///
    /// Errors if `fl` or `def` are missing, or if any node in the definition
    /// section is malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let object = wire::object(value, "entry")?;
        Ok(Self {
            functional_label: wire::string(wire::field(object, "entry", "fl")?, "fl")?.to_owned(),
            definition: DefinitionSection::parse(wire::field(object, "entry", "def")?)?,
        })
    }

    /// Renders the functional label, followed by the definition section on
    /// the next line.
    ///
    /// # Errors
    ///
    /// Errors if a node in the definition section cannot be rendered.
    pub fn render(&self) -> Result<Doc, RenderError> {
        self.to_doc()
    }
}

impl WriteDoc for Entry {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        w.styled(Role::FunctionalLabel, |w| w.text(&self.functional_label));
        w.line_break();
        self.definition.write_doc(w)
    }
}

/// Definition section: `def`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.def).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSection(pub Vec<DefinitionItem>);

/// Child of a [`DefinitionSection`].
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum DefinitionItem {
    /// `vd`
    VerbDivider(VerbDivider),
    /// `sseq`
    SenseSequence(SenseSequence),
}

impl DefinitionSection {
    /// Builds from a `def` payload: an array of objects, whose keys are read
    /// in order.
    ///
    /// # Errors
    ///
    /// Errors if the payload does not have that shape, or if a child is
    /// malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut items = Vec::new();
        for group in wire::array(value, "def")? {
            for (key, value) in wire::object(group, "def")? {
                let item: DefinitionItem = match key.as_str() {
                    "vd" => VerbDivider::parse(value)?.into(),
                    "sseq" => SenseSequence::parse(value)?.into(),
                    key => {
                        debug!(key, "Skipping unsupported `def` key");
                        continue;
                    }
                };
                items.push(item);
            }
        }
        Ok(Self(items))
    }
}

impl WriteDoc for DefinitionSection {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        write_lines(w, &self.0)
    }
}

impl WriteDoc for DefinitionItem {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        match self {
            Self::VerbDivider(vd) => vd.write_doc(w),
            Self::SenseSequence(sseq) => sseq.write_doc(w),
        }
    }
}

/// Verb divider: `vd`, e.g. `transitive verb`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.vd).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbDivider(pub String);

impl VerbDivider {
    /// Builds from a `vd` string.
    ///
    /// # Errors
    ///
    /// Errors if the payload is not a string.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        wire::string(value, "vd").map(|label| Self(label.to_owned()))
    }
}

impl WriteDoc for VerbDivider {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        w.styled(Role::VerbDivider, |w| w.text(&self.0));
        Ok(())
    }
}
