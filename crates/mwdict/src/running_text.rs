//! Running text: prose with inline `{tag|arg|...}` markup.
//!
//! See [the API docs](https://dictionaryapi.com/products/json#sec-2.tokens).

use {
    crate::{
        ParseError,
        render::{DocWriter, Role, Style},
    },
    derive_more::Deref,
    tracing::trace,
};

/// Tokenized running text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct RunningText(pub Vec<Segment>);

/// Literal text or a markup token inside [`RunningText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside of any braces.
    Text(String),
    /// Contents of a `{...}` token.
    Markup(Markup),
}

/// Single `{tag|arg|...}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    /// Name of the token, e.g. `bc` or `/it`.
    pub tag: String,
    /// Pipe-separated arguments after the tag.
    pub args: Vec<String>,
}

/// Tags which render their first argument.
const ARGUMENT_TAGS: &[&str] = &["sx", "dxt", "a_link", "d_link"];

impl Markup {
    /// Parses the text between a pair of braces.
    ///
    /// # Errors
    ///
    /// Errors if the tag is one that renders its first argument, but there are
    /// no arguments.
    pub fn parse(inner: &str) -> Result<Self, ParseError> {
        let mut parts = inner.split('|');
        let tag = parts.next().unwrap_or_default().to_owned();
        let args = parts.map(ToOwned::to_owned).collect::<Vec<_>>();
        if args.is_empty() && ARGUMENT_TAGS.contains(&tag.as_str()) {
            return Err(ParseError::MissingArgument { tag });
        }
        Ok(Self { tag, args })
    }

    fn first_arg(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }
}

impl RunningText {
    /// Splits `text` into literal and markup segments.
    ///
    /// Braces do not nest: a token runs from a `{` to the next `}`.
    ///
    /// # Errors
    ///
    /// Errors if a `{` is never closed, or if a token is malformed.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut segments = Vec::new();
        let mut rest = text;
        let mut offset = 0;
        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_owned()));
            }
            let inner_start = open + 1;
            let close = rest[inner_start..]
                .find('}')
                .ok_or_else(|| ParseError::UnterminatedMarkup {
                    text: text.to_owned(),
                    offset: offset + open,
                })?;
            let inner = &rest[inner_start..inner_start + close];
            segments.push(Segment::Markup(Markup::parse(inner)?));

            let consumed = inner_start + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_owned()));
        }
        Ok(Self(segments))
    }

    /// Writes the rendered text in the writer's current style.
    ///
    /// | token | output |
    /// |---|---|
    /// | `{bc}` | `: ` |
    /// | `{sx\|word\|...}` | `WORD`, as a cross-reference |
    /// | `{dxt\|word:2\|...}` | `word` |
    /// | `{a_link\|word}`, `{d_link\|word\|...}` | `word` |
    /// | `{b}`..`{/b}` | enclosed text in bold |
    /// | `{it}`, `{wi}`, `{qword}`, `{phrase}` pairs | enclosed text in italics |
    /// | anything else | nothing |
    pub fn write(&self, w: &mut DocWriter) {
        let mut emphasis = Style::default();
        for segment in &self.0 {
            match segment {
                Segment::Text(text) => w.styled(emphasis, |w| w.text(text)),
                Segment::Markup(markup) => match markup.tag.as_str() {
                    "bc" => w.styled(emphasis, |w| w.text(": ")),
                    "sx" => w.styled(emphasis, |w| {
                        w.styled(Role::CrossReference, |w| {
                            w.text(&markup.first_arg().to_uppercase());
                        });
                    }),
                    "dxt" => w.styled(emphasis, |w| {
                        w.text(strip_homograph(markup.first_arg()));
                    }),
                    "a_link" | "d_link" => w.styled(emphasis, |w| w.text(markup.first_arg())),
                    "b" => emphasis.bold = true,
                    "/b" => emphasis.bold = false,
                    "it" | "wi" | "qword" | "phrase" => emphasis.italic = true,
                    "/it" | "/wi" | "/qword" | "/phrase" => emphasis.italic = false,
                    "dx_def" | "/dx_def" => {}
                    tag => trace!(tag, "Skipping unsupported markup"),
                },
            }
        }
    }
}

/// Strips a homograph suffix like `:2` from a cross-reference target.
fn strip_homograph(target: &str) -> &str {
    match target.rsplit_once(':') {
        Some((word, number))
            if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) =>
        {
            word
        }
        _ => target,
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::render::Piece};

    fn text(s: &str) -> Segment {
        Segment::Text(s.into())
    }

    fn markup(tag: &str, args: &[&str]) -> Segment {
        Segment::Markup(Markup {
            tag: tag.into(),
            args: args.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    fn plain(raw: &str) -> String {
        let mut w = DocWriter::new();
        RunningText::parse(raw).unwrap().write(&mut w);
        w.finish().to_plain()
    }

    #[test]
    fn tokenize() {
        assert_eq!(
            RunningText::parse("a{bc}b{sx|FOO|x|y}c").unwrap(),
            RunningText(vec![
                text("a"),
                markup("bc", &[]),
                text("b"),
                markup("sx", &["FOO", "x", "y"]),
                text("c"),
            ])
        );
    }

    #[test]
    fn adjacent_markup_has_no_empty_text() {
        assert_eq!(
            RunningText::parse("{bc}{it}x{/it}").unwrap(),
            RunningText(vec![
                markup("bc", &[]),
                markup("it", &[]),
                text("x"),
                markup("/it", &[]),
            ])
        );
        assert_eq!(RunningText::parse("").unwrap(), RunningText::default());
    }

    #[test]
    fn unterminated_markup() {
        assert!(matches!(
            RunningText::parse("ok {bc} then {sx|oops"),
            Err(ParseError::UnterminatedMarkup { offset: 13, .. })
        ));
    }

    #[test]
    fn missing_argument() {
        assert!(matches!(
            RunningText::parse("{sx}"),
            Err(ParseError::MissingArgument { tag }) if tag == "sx"
        ));
    }

    #[test]
    fn render_tokens() {
        assert_eq!(plain("a{bc}b{sx|FOO|x|y}c"), "a: bFOOc");
        assert_eq!(plain("{bc}see {sx|run||}"), ": see RUN");
        assert_eq!(plain("{dxt|dash:1||} and {dxt|dash||}"), "dash and dash");
        assert_eq!(plain("{dxt|ratio:x||}"), "ratio:x");
        assert_eq!(plain("{a_link|mouse} {d_link|cat|cat:1}"), "mouse cat");
        assert_eq!(
            plain("{dx_def}see {dxt|run|run|1a}{/dx_def}"),
            "see run"
        );
        assert_eq!(plain("{ldquo}quoted{rdquo} {unknown|x}"), "quoted ");
    }

    #[test]
    fn cross_references_are_styled() {
        let mut w = DocWriter::new();
        RunningText::parse("a{sx|foo||}").unwrap().write(&mut w);
        assert_eq!(
            w.finish().0,
            vec![
                Piece::Text {
                    text: "a".into(),
                    style: Style::default(),
                },
                Piece::Text {
                    text: "FOO".into(),
                    style: Role::CrossReference.into(),
                },
            ]
        );
    }

    #[test]
    fn formatting_pairs_only_change_style() {
        assert_eq!(plain("a {it}b{/it} {b}c{/b}"), "a b c");

        let mut w = DocWriter::new();
        RunningText::parse("{wi}b{/wi}").unwrap().write(&mut w);
        assert_eq!(
            w.finish().0,
            vec![Piece::Text {
                text: "b".into(),
                style: Style {
                    italic: true,
                    ..Default::default()
                },
            }]
        );
    }
}
