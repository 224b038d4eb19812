use {
    super::DefiningText,
    crate::{
        ParseError, RenderError,
        render::{DocWriter, Role, WriteDoc},
        running_text::RunningText,
        sense_number::SenseNumber,
        wire::{self, Object},
    },
    serde_json::Value,
    tracing::trace,
};

/// Sense: `sense`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.sense).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    /// Position of this sense in its sequence.
    pub number: Option<SenseNumber>,
    /// Definition of this sense.
    pub defining_text: DefiningText,
    /// Further definition split off by a divider like `also`.
    pub divided_sense: Option<DividedSense>,
}

impl Sense {
    /// Builds from a `sense` payload.
    ///
    /// # Errors
    ///
    /// Errors with [`ParseError::NotImplemented`] if the payload is not an
    /// object, as only the object form is supported. Otherwise errors if a
    /// field is missing or malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(ParseError::NotImplemented {
                node: "sense",
                shape: wire::shape(other),
            }),
        }
    }

    /// Builds from a `sense` payload in object form.
    ///
    /// # Errors
    ///
    /// Errors if `dt` is missing, or if a field is malformed.
    pub fn from_object(object: &Object) -> Result<Self, ParseError> {
        Ok(Self {
            number: parse_number(object)?,
            defining_text: DefiningText::from_elements(wire::field(object, "sense", "dt")?)?,
            divided_sense: object
                .get("sdsense")
                .map(DividedSense::parse)
                .transpose()?,
        })
    }

    fn write_body(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        self.defining_text.write_doc(w)?;
        if let Some(divided_sense) = &self.divided_sense {
            w.line_break();
            divided_sense.write_doc(w)?;
        }
        Ok(())
    }
}

impl WriteDoc for Sense {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        let Some(number) = &self.number else {
            return self.write_body(w);
        };
        let width = write_number(w, number);
        w.indented(width, |w| self.write_body(w))
    }
}

/// Writes a styled sense number and the space after it, returning how many
/// columns they take up.
fn write_number(w: &mut DocWriter, number: &SenseNumber) -> usize {
    let number = number.to_string();
    w.styled(Role::SenseNumber, |w| w.text(&number));
    w.text(" ");
    number.chars().count() + 1
}

fn parse_number(object: &Object) -> Result<Option<SenseNumber>, ParseError> {
    object
        .get("sn")
        .map(|sn| SenseNumber::parse(wire::string(sn, "sn")?))
        .transpose()
}

/// Truncated sense: `sen`.
///
/// Only the sense number and etymology are read.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.sen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedSense {
    /// Position of this sense in its sequence.
    pub number: Option<SenseNumber>,
    /// Etymology of this sense.
    pub etymology: Option<Etymology>,
}

impl TruncatedSense {
    /// Builds from a `sen` payload.
    ///
    /// # Errors
    ///
    /// Errors with [`ParseError::NotImplemented`] if the payload is not an
    /// object, as only the object form is supported. Otherwise errors if a
    /// field is malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(object) => Ok(Self {
                number: parse_number(object)?,
                etymology: object.get("et").map(Etymology::parse).transpose()?,
            }),
            other => Err(ParseError::NotImplemented {
                node: "sen",
                shape: wire::shape(other),
            }),
        }
    }
}

impl WriteDoc for TruncatedSense {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        let etymology = self.etymology.as_ref().ok_or(RenderError::NotImplemented {
            node: "sen",
            missing: "an etymology",
        })?;
        if let Some(number) = &self.number {
            write_number(w, number);
        }
        w.text("[ ");
        etymology.write_doc(w)?;
        w.text(" ]");
        Ok(())
    }
}

/// Etymology: `et`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.et).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etymology {
    /// Etymology text. Supplemental notes are not read.
    pub text: RunningText,
}

impl Etymology {
    /// Builds from the list of `[tag, payload]` elements of an `et`.
    ///
    /// # Errors
    ///
    /// Errors if there is no `text` element, or if an element is malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let mut text = None;
        for element in wire::array(value, "et")? {
            match wire::pair(element, "et")? {
                ("text", payload) => {
                    text = Some(RunningText::parse(wire::string(payload, "text")?)?);
                }
                (tag, _) => trace!(tag, "Skipping unsupported `et` element"),
            }
        }
        text.map(|text| Self { text })
            .ok_or(ParseError::MissingField {
                node: "et",
                field: "text",
            })
    }
}

impl WriteDoc for Etymology {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        self.text.write(w);
        Ok(())
    }
}

/// Divided sense: `sdsense`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.sdsense).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividedSense {
    /// Divider, e.g. `also` or `specifically`.
    pub divider_label: String,
    /// Definition of this part of the sense.
    pub defining_text: DefiningText,
}

impl DividedSense {
    /// Builds from an `sdsense` object.
    ///
    /// # Errors
    ///
    /// Errors if `sd` or `dt` are missing or malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let object = wire::object(value, "sdsense")?;
        Ok(Self {
            divider_label: wire::string(wire::field(object, "sdsense", "sd")?, "sd")?.to_owned(),
            defining_text: DefiningText::from_elements(wire::field(object, "sdsense", "dt")?)?,
        })
    }
}

impl WriteDoc for DividedSense {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        w.styled(Role::DividerLabel, |w| w.text(&self.divider_label));
        self.defining_text.write_doc(w)
    }
}
