use {
    super::{Sense, TruncatedSense},
    crate::{
        ParseError, RenderError,
        render::{DocWriter, WriteDoc, write_lines},
        wire,
    },
    derive_more::From,
    serde_json::Value,
    tracing::debug,
};

/// Sense sequence: `sseq`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.sseq).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseSequence(pub Vec<Vec<SequenceItem>>);

/// Element of a row in a [`SenseSequence`].
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum SequenceItem {
    /// `sense`
    Sense(Sense),
    /// `sen`
    TruncatedSense(TruncatedSense),
    /// `pseq`
    Parenthesized(ParenthesizedSenseSequence),
    /// `bs`
    BindingSubstitute(BindingSubstitute),
}

impl SenseSequence {
    /// Builds from an `sseq` payload: an array of rows, each an array of
    /// `[tag, payload]` pairs.
    ///
    /// Elements with unsupported tags are skipped.
    ///
    /// # Errors
    ///
    /// Errors if the payload does not have that shape, or if an element is
    /// malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        wire::array(value, "sseq")?
            .iter()
            .map(parse_row)
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

fn parse_row(row: &Value) -> Result<Vec<SequenceItem>, ParseError> {
    let mut items = Vec::new();
    for element in wire::array(row, "sseq")? {
        let item: SequenceItem = match wire::pair(element, "sseq")? {
            ("sense", payload) => Sense::parse(payload)?.into(),
            ("sen", payload) => TruncatedSense::parse(payload)?.into(),
            ("pseq", payload) => ParenthesizedSenseSequence::parse(payload)?.into(),
            ("bs", _) => BindingSubstitute::from_pair(element)?.into(),
            (tag, _) => {
                debug!(tag, "Skipping unsupported `sseq` element");
                continue;
            }
        };
        items.push(item);
    }
    Ok(items)
}

impl WriteDoc for SenseSequence {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        write_lines(w, self.0.iter().flatten())
    }
}

impl WriteDoc for SequenceItem {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        match self {
            Self::Sense(sense) => sense.write_doc(w),
            Self::TruncatedSense(sense) => sense.write_doc(w),
            Self::Parenthesized(pseq) => pseq.write_doc(w),
            Self::BindingSubstitute(bs) => bs.write_doc(w),
        }
    }
}

/// Parenthesized sense sequence: `pseq`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.pseq).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedSenseSequence(pub Vec<ParenthesizedItem>);

/// Element of a [`ParenthesizedSenseSequence`].
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum ParenthesizedItem {
    /// `bs`
    BindingSubstitute(BindingSubstitute),
    /// `sense`
    Sense(Sense),
}

impl ParenthesizedSenseSequence {
    /// Builds from a `pseq` payload: an array of `[tag, payload]` pairs.
    ///
    /// # Errors
    ///
    /// Errors if the payload does not have that shape, or if an element is
    /// malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut items = Vec::new();
        for element in wire::array(value, "pseq")? {
            let item: ParenthesizedItem = match wire::pair(element, "pseq")? {
                ("bs", _) => BindingSubstitute::from_pair(element)?.into(),
                ("sense", payload) => Sense::parse(payload)?.into(),
                (tag, _) => {
                    debug!(tag, "Skipping unsupported `pseq` element");
                    continue;
                }
            };
            items.push(item);
        }
        Ok(Self(items))
    }
}

impl WriteDoc for ParenthesizedSenseSequence {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        write_lines(w, &self.0)
    }
}

impl WriteDoc for ParenthesizedItem {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        match self {
            Self::BindingSubstitute(bs) => bs.write_doc(w),
            Self::Sense(sense) => sense.write_doc(w),
        }
    }
}

/// Binding substitute: `bs`.
///
/// A sense whose definition applies to every following sense in its
/// sequence. It is rendered like any other sense.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.bs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSubstitute {
    /// Wrapped sense.
    pub sense: Sense,
}

impl BindingSubstitute {
    /// Builds from a `["bs", {"sense": {...}}]` pair.
    ///
    /// # Errors
    ///
    /// Errors if the pair is not tagged `bs`, or its payload is not an object
    /// containing a valid `sense`.
    pub fn from_pair(value: &Value) -> Result<Self, ParseError> {
        let object = wire::object(wire::tagged(value, "bs")?, "bs")?;
        Ok(Self {
            sense: Sense::parse(wire::field(object, "bs", "sense")?)?,
        })
    }
}

impl WriteDoc for BindingSubstitute {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        self.sense.write_doc(w)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn sense(sn: &str, text: &str) -> Value {
        json!(["sense", { "sn": sn, "dt": [["text", text]] }])
    }

    #[test]
    fn rows_flatten_into_lines() {
        let sseq = SenseSequence::parse(&json!([
            [sense("1", "first")],
            [
                ["bs", { "sense": { "sn": "2", "dt": [["text", "bound"]] } }],
                sense("a", "second"),
                ["snote", []],
            ],
            [["sen", { "sn": "3", "et": [["text", "old"]] }]],
        ]))
        .unwrap();
        assert_eq!(sseq.0.len(), 3);
        assert_eq!(sseq.0[1].len(), 2);
        assert_eq!(
            sseq.to_doc().unwrap().to_plain(),
            "1 first\n2 bound\n  a second\n3 [ old ]"
        );
    }

    #[test]
    fn parenthesized_sequence() {
        let sseq = SenseSequence::parse(&json!([[
            ["pseq", [
                ["bs", { "sense": { "sn": "1", "dt": [["text", "{bc}whole"]] } }],
                sense("(1)", "part"),
                ["sen", {}],
                sense("(2)", "other"),
            ]],
        ]]))
        .unwrap();
        let SequenceItem::Parenthesized(pseq) = &sseq.0[0][0] else {
            panic!("expected a pseq, got {sseq:?}");
        };
        assert_eq!(pseq.0.len(), 3);
        assert!(matches!(pseq.0[0], ParenthesizedItem::BindingSubstitute(_)));
        assert_eq!(
            sseq.to_doc().unwrap().to_plain(),
            "1 : whole\n    (1) part\n    (2) other"
        );
    }

    #[test]
    fn binding_substitute_shapes() {
        assert!(matches!(
            BindingSubstitute::from_pair(&json!(["sense", {}])),
            Err(ParseError::UnexpectedTag { expected: "bs", .. })
        ));
        assert!(matches!(
            BindingSubstitute::from_pair(&json!(["bs", []])),
            Err(ParseError::Malformed { node: "bs", .. })
        ));
        assert!(matches!(
            BindingSubstitute::from_pair(&json!(["bs", {}])),
            Err(ParseError::MissingField {
                node: "bs",
                field: "sense"
            })
        ));
    }

    #[test]
    fn malformed_rows() {
        assert!(matches!(
            SenseSequence::parse(&json!({})),
            Err(ParseError::Malformed { node: "sseq", .. })
        ));
        assert!(matches!(
            SenseSequence::parse(&json!([["sense"]])),
            Err(ParseError::Malformed { node: "sseq", .. })
        ));
        assert!(matches!(
            SenseSequence::parse(&json!([[["sense", [["dt", []]]]]])),
            Err(ParseError::NotImplemented { node: "sense", .. })
        ));
    }
}
