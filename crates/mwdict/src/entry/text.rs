use {
    crate::{
        ParseError, RenderError,
        render::{DocWriter, Role, WriteDoc, write_lines},
        running_text::RunningText,
        wire,
    },
    serde::Deserialize,
    serde_json::Value,
    std::fmt,
    tracing::trace,
};

/// Defining text: `dt`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.dt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefiningText {
    /// Definition itself.
    pub text: RunningText,
    /// Example usages of the defined sense.
    pub illustrations: Option<VerbalIllustrationSet>,
}

impl DefiningText {
    /// Builds from the list of `[tag, payload]` elements of a `dt`.
    ///
    /// Only `text` and `vis` are read. If one appears more than once, the
    /// last one is kept.
    ///
    /// # Errors
    ///
    /// Errors if there is no `text` element, or if an element is malformed.
    pub fn from_elements(value: &Value) -> Result<Self, ParseError> {
        let mut text = None;
        let mut illustrations = None;
        for element in wire::array(value, "dt")? {
            match wire::pair(element, "dt")? {
                ("text", payload) => {
                    text = Some(RunningText::parse(wire::string(payload, "text")?)?);
                }
                ("vis", _) => {
                    illustrations = Some(VerbalIllustrationSet::from_pair(element)?);
                }
                (tag, _) => trace!(tag, "Skipping unsupported `dt` element"),
            }
        }
        Ok(Self {
            text: text.ok_or(ParseError::MissingField {
                node: "dt",
                field: "text",
            })?,
            illustrations,
        })
    }
}

impl WriteDoc for DefiningText {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        self.text.write(w);
        if let Some(illustrations) = &self.illustrations {
            w.line_break();
            illustrations.write_doc(w)?;
        }
        Ok(())
    }
}

/// Verbal illustrations: `vis`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.vis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbalIllustrationSet(pub Vec<VerbalIllustration>);

impl VerbalIllustrationSet {
    /// Builds from a `["vis", [...]]` pair.
    ///
    /// # Errors
    ///
    /// Errors if the pair is not tagged `vis`, if its payload is not a
    /// non-empty array, or if any illustration is malformed.
    pub fn from_pair(value: &Value) -> Result<Self, ParseError> {
        let items = wire::array(wire::tagged(value, "vis")?, "vis")?;
        if items.is_empty() {
            return Err(ParseError::Malformed {
                node: "vis",
                expected: "a non-empty array",
            });
        }
        items
            .iter()
            .map(VerbalIllustration::parse)
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl WriteDoc for VerbalIllustrationSet {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        write_lines(w, &self.0)
    }
}

/// Single example usage of a sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbalIllustration {
    /// Example sentence.
    pub text: RunningText,
    /// Who the example is quoted from.
    pub attribution: Option<AuthorQuotation>,
}

impl VerbalIllustration {
    /// Builds from a `{"t": ..., "aq": ...}` object.
    ///
    /// # Errors
    ///
    /// Errors if `t` is missing, or if either field is malformed.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let object = wire::object(value, "vis")?;
        let text = RunningText::parse(wire::string(wire::field(object, "vis", "t")?, "t")?)?;
        let attribution = object.get("aq").map(AuthorQuotation::parse).transpose()?;
        Ok(Self { text, attribution })
    }
}

impl WriteDoc for VerbalIllustration {
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError> {
        w.styled(Role::IllustrationMarker, |w| w.text("// "));
        w.styled(Role::Illustration, |w| self.text.write(w));
        if let Some(attribution) = &self.attribution {
            w.text(" -- ");
            w.text(&attribution.to_string());
        }
        Ok(())
    }
}

/// Attribution of a quote: `aq`.
///
/// See [the API docs](https://dictionaryapi.com/products/json#sec-2.aq).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorQuotation {
    /// Name of the author.
    #[serde(rename = "auth")]
    pub author: Option<String>,
    /// Work the quote is from.
    pub source: Option<String>,
    /// When the quote was written.
    #[serde(rename = "aqdate")]
    pub date: Option<String>,
}

impl AuthorQuotation {
    /// Builds from an `aq` object.
    ///
    /// # Errors
    ///
    /// Errors if the payload is not an object of optional strings.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        Self::deserialize(value).map_err(|source| ParseError::Deserialize { node: "aq", source })
    }
}

/// Writes the present parts, separated by spaces.
impl fmt::Display for AuthorQuotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [&self.author, &self.source, &self.date];
        for (index, part) in parts.into_iter().flatten().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn plain(node: &impl WriteDoc) -> String {
        node.to_doc().unwrap().to_plain()
    }

    #[test]
    fn defining_text_with_illustrations() {
        let dt = DefiningText::from_elements(&json!([
            ["text", "{bc}to move quickly"],
            ["vis", [
                { "t": "{wi}run{/wi} home" },
                { "t": "she ran", "aq": { "auth": "A. Writer", "aqdate": "1999" } },
            ]],
            ["uns", [[["text", "ignored"]]]],
        ]))
        .unwrap();
        assert_eq!(
            plain(&dt),
            ": to move quickly\n// run home\n// she ran -- A. Writer 1999"
        );
    }

    #[test]
    fn last_text_wins() {
        let dt = DefiningText::from_elements(&json!([
            ["text", "first"],
            ["text", "second"],
        ]))
        .unwrap();
        assert_eq!(plain(&dt), "second");
    }

    #[test]
    fn missing_text() {
        assert!(matches!(
            DefiningText::from_elements(&json!([["vis", [{ "t": "x" }]]])),
            Err(ParseError::MissingField {
                node: "dt",
                field: "text"
            })
        ));
    }

    #[test]
    fn empty_illustration_set() {
        assert!(matches!(
            VerbalIllustrationSet::from_pair(&json!(["vis", []])),
            Err(ParseError::Malformed { node: "vis", .. })
        ));
        assert!(matches!(
            VerbalIllustrationSet::from_pair(&json!(["vis", {}])),
            Err(ParseError::Malformed { node: "vis", .. })
        ));
    }

    #[test]
    fn illustration_requires_text() {
        assert!(matches!(
            VerbalIllustration::parse(&json!({ "aq": { "auth": "x" } })),
            Err(ParseError::MissingField {
                node: "vis",
                field: "t"
            })
        ));
    }

    #[test]
    fn author_quotation_parts() {
        let aq = AuthorQuotation::parse(&json!({
            "auth": "Jane Doe",
            "source": "Letters",
            "aqdate": "1850",
            "subsource": { "source": "ignored" },
        }))
        .unwrap();
        assert_eq!(aq.to_string(), "Jane Doe Letters 1850");

        let aq = AuthorQuotation::parse(&json!({ "source": "Letters" })).unwrap();
        assert_eq!(aq.to_string(), "Letters");

        assert_eq!(AuthorQuotation::parse(&json!({})).unwrap().to_string(), "");
        assert!(matches!(
            AuthorQuotation::parse(&json!({ "auth": 5 })),
            Err(ParseError::Deserialize { node: "aq", .. })
        ));
    }

    #[test]
    fn illustration_styles() {
        let vi = VerbalIllustration::parse(&json!({ "t": "ran {it}fast{/it}" })).unwrap();
        let doc = vi.to_doc().unwrap();
        let roles = doc
            .iter()
            .filter_map(|piece| match piece {
                crate::render::Piece::Text { style, .. } => Some((style.role, style.italic)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            roles,
            vec![
                (Some(Role::IllustrationMarker), false),
                (Some(Role::Illustration), false),
                (Some(Role::Illustration), true),
            ]
        );
    }
}
