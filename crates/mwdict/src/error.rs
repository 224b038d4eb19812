use derive_more::{Display, Error};

/// Failed to build an [entry] node from its JSON payload.
///
/// Any of these aborts parsing of the whole entry.
///
/// [entry]: crate::Entry
#[derive(Debug, Display, Error)]
pub enum ParseError {
    /// Running text contains a `{` with no matching `}`.
    #[display("unterminated markup at byte {offset} of {text:?}")]
    UnterminatedMarkup {
        /// Full running text being tokenized.
        text: String,
        /// Byte offset of the opening `{`.
        offset: usize,
    },
    /// A markup tag which renders its first argument has no arguments.
    #[display("markup tag `{tag}` is missing its first argument")]
    MissingArgument {
        /// Name of the tag.
        tag: String,
    },
    /// A required key is absent from an object payload.
    #[display("`{node}` is missing required field `{field}`")]
    MissingField {
        /// Node being parsed.
        node: &'static str,
        /// Key which was expected.
        field: &'static str,
    },
    /// A `[tag, payload]` pair carries a different tag than the node expects.
    #[display("expected a `{expected}` node, found `{found}`")]
    UnexpectedTag {
        /// Tag the node is parsed from.
        expected: &'static str,
        /// Tag that was found.
        found: String,
    },
    /// Payload has a JSON shape which this node does not accept.
    #[display("malformed `{node}` node, expected {expected}")]
    Malformed {
        /// Node being parsed.
        node: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },
    /// Payload has a shape which is valid in the API schema, but is not
    /// supported yet.
    #[display("`{node}` in {shape} form is not implemented")]
    NotImplemented {
        /// Node being parsed.
        node: &'static str,
        /// Shape of the payload.
        shape: &'static str,
    },
    /// Sense number does not match `<numeral> <letter> (<numeral>)`, or has
    /// none of those parts.
    #[display("invalid sense number {_0:?}")]
    InvalidSenseNumber(#[error(ignore)] String),
    /// Payload could not be deserialized into the node type.
    #[display("failed to deserialize `{node}`")]
    Deserialize {
        /// Node being parsed.
        node: &'static str,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Failed to write a parsed [entry] out into a [`Doc`].
///
/// [entry]: crate::Entry
/// [`Doc`]: crate::render::Doc
#[derive(Debug, Clone, Display, Error)]
pub enum RenderError {
    /// Node was parsed, but rendering it in its current form is not
    /// supported yet.
    #[display("rendering `{node}` without {missing} is not implemented")]
    NotImplemented {
        /// Node being rendered.
        node: &'static str,
        /// What the node is missing.
        missing: &'static str,
    },
}
