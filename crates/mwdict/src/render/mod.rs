//! Styled document model, and painters which turn it into output text.
//!
//! Grammar nodes never produce output strings directly. They write into a
//! [`DocWriter`], tagging text with a [`Style`] that says what the text *is*
//! (a sense number, a verb divider, ...) rather than how it looks. A painter
//! then decides the look for its medium:
//! - [`Doc::to_plain`] drops all styling
//! - [`Doc::to_ansi`] uses terminal colors and attributes
//! - [`Doc::to_html`] uses inline CSS, e.g. for flashcard fields

mod ansi;
mod html;

use {
    crate::RenderError,
    derive_more::Deref,
    std::fmt,
};

/// What a piece of text represents in an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Part of speech of the entry, e.g. `verb`.
    FunctionalLabel,
    /// Verb divider, e.g. `transitive verb`.
    VerbDivider,
    /// Sense number, e.g. `1 a`.
    SenseNumber,
    /// Target of a synonymous cross-reference.
    CrossReference,
    /// Leading `// ` of a verbal illustration.
    IllustrationMarker,
    /// Text of a verbal illustration.
    Illustration,
    /// Label of a divided sense, e.g. `also`.
    DividerLabel,
}

/// How a piece of text is styled.
///
/// `role` comes from the grammar node that wrote the text. `bold` and
/// `italic` come from inline formatting markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Innermost role of the text.
    pub role: Option<Role>,
    /// Text is inside bold markup.
    pub bold: bool,
    /// Text is inside italic markup.
    pub italic: bool,
}

impl Style {
    /// Layers `inner` on top of this style.
    ///
    /// The innermost role wins, and emphasis accumulates.
    #[must_use]
    pub fn within(self, inner: Self) -> Self {
        Self {
            role: inner.role.or(self.role),
            bold: self.bold || inner.bold,
            italic: self.italic || inner.italic,
        }
    }
}

impl From<Role> for Style {
    fn from(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }
}

/// Single element of a [`Doc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Run of text on a single line, all with the same style.
    Text {
        /// Text, never containing `\n`.
        text: String,
        /// Style of the whole run.
        style: Style,
    },
    /// Indentation at the start of a line, in columns.
    Indent(usize),
    /// Line break.
    Break,
}

/// Rendered entry, as a flat list of [`Piece`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Doc(pub Vec<Piece>);

impl Doc {
    /// Paints this document as unstyled text.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for piece in &self.0 {
            match piece {
                Piece::Text { text, .. } => out.push_str(text),
                Piece::Indent(width) => out.extend(std::iter::repeat_n(' ', *width)),
                Piece::Break => out.push('\n'),
            }
        }
        out
    }

    /// Paints this document as text with ANSI escape codes.
    ///
    /// Whether escape codes are emitted at all follows [`colored`]'s global
    /// control, which respects `NO_COLOR` and `CLICOLOR_FORCE`.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        ansi::paint(self)
    }

    /// Paints this document as HTML, with line breaks as `<br>`.
    #[must_use]
    pub fn to_html(&self) -> maud::Markup {
        html::paint(self)
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

/// Builds a [`Doc`], tracking the current style and indentation.
///
/// Indentation is explicit context rather than a post-processing step: inside
/// [`DocWriter::indented`], every line break is followed by the indentation,
/// and spaces at the start of the next line's text are dropped so that all
/// lines align on the same column.
#[derive(Debug, Default)]
pub struct DocWriter {
    pieces: Vec<Piece>,
    style: Style,
    indent: usize,
    line_start: bool,
}

impl DocWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the writer, returning the written document.
    #[must_use]
    pub fn finish(self) -> Doc {
        Doc(self.pieces)
    }

    /// Writes text in the current style.
    ///
    /// Any `\n` in `text` is written as a [`DocWriter::line_break`].
    pub fn text(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.line(first);
        }
        for line in lines {
            self.line_break();
            self.line(line);
        }
    }

    /// Ends the current line, and indents the next one.
    pub fn line_break(&mut self) {
        self.pieces.push(Piece::Break);
        if self.indent > 0 {
            self.pieces.push(Piece::Indent(self.indent));
        }
        self.line_start = true;
    }

    /// Runs `f` with `style` layered on top of the current style.
    pub fn styled<R>(&mut self, style: impl Into<Style>, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.style;
        self.style = outer.within(style.into());
        let result = f(self);
        self.style = outer;
        result
    }

    /// Runs `f` with continuation lines indented by `width` more columns.
    pub fn indented<R>(&mut self, width: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.indent;
        self.indent = outer + width;
        let result = f(self);
        self.indent = outer;
        result
    }

    fn line(&mut self, text: &str) {
        let text = if self.line_start && self.indent > 0 {
            text.trim_start_matches(' ')
        } else {
            text
        };
        if text.is_empty() {
            return;
        }
        self.line_start = false;

        if let Some(Piece::Text { text: last, style }) = self.pieces.last_mut() {
            if *style == self.style {
                last.push_str(text);
                return;
            }
        }
        self.pieces.push(Piece::Text {
            text: text.to_owned(),
            style: self.style,
        });
    }
}

/// Node which can write itself into a [`DocWriter`].
pub trait WriteDoc {
    /// Writes this node at the writer's current position.
    ///
    /// # Errors
    ///
    /// Errors if this node, or one of its children, cannot be rendered in its
    /// current form.
    fn write_doc(&self, w: &mut DocWriter) -> Result<(), RenderError>;

    /// Renders this node on its own into a new [`Doc`].
    ///
    /// # Errors
    ///
    /// See [`WriteDoc::write_doc`].
    fn to_doc(&self) -> Result<Doc, RenderError> {
        let mut w = DocWriter::new();
        self.write_doc(&mut w)?;
        Ok(w.finish())
    }
}

/// Writes each item, separated by line breaks.
pub(crate) fn write_lines<'a, T: WriteDoc + 'a>(
    w: &mut DocWriter,
    items: impl IntoIterator<Item = &'a T>,
) -> Result<(), RenderError> {
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            w.line_break();
        }
        item.write_doc(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(text: &str, style: Style) -> Piece {
        Piece::Text {
            text: text.into(),
            style,
        }
    }

    #[test]
    fn merges_runs_of_same_style() {
        let mut w = DocWriter::new();
        w.text("foo");
        w.text("bar");
        w.styled(Role::SenseNumber, |w| w.text("1"));
        w.text("baz");
        assert_eq!(
            w.finish(),
            Doc(vec![
                text("foobar", Style::default()),
                text("1", Role::SenseNumber.into()),
                text("baz", Style::default()),
            ])
        );
    }

    #[test]
    fn newlines_become_breaks() {
        let mut w = DocWriter::new();
        w.text("a\nb");
        let doc = w.finish();
        assert_eq!(
            doc,
            Doc(vec![
                text("a", Style::default()),
                Piece::Break,
                text("b", Style::default()),
            ])
        );
        assert_eq!(doc.to_plain(), "a\nb");
    }

    #[test]
    fn indentation_aligns_continuation_lines() {
        let mut w = DocWriter::new();
        w.text("1 ");
        w.indented(2, |w| {
            w.text("first\n   second");
            w.line_break();
            w.text("third");
        });
        w.line_break();
        w.text("   outside");
        assert_eq!(
            w.finish().to_plain(),
            "1 first\n  second\n  third\n   outside"
        );
    }

    #[test]
    fn nested_styles_layer() {
        let outer = Style::from(Role::Illustration);
        let inner = Style {
            bold: true,
            ..Default::default()
        };
        assert_eq!(
            outer.within(inner),
            Style {
                role: Some(Role::Illustration),
                bold: true,
                italic: false,
            }
        );
        assert_eq!(
            outer.within(Role::CrossReference.into()).role,
            Some(Role::CrossReference)
        );
    }
}
