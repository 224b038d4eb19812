use {
    super::{Doc, Piece, Role, Style},
    maud::{Markup, PreEscaped, Render, html},
};

const NBSP: char = '\u{a0}';

pub fn paint(doc: &Doc) -> Markup {
    let mut out = String::new();
    // HTML collapses runs of spaces and drops them at line starts, but blank
    // sense number columns must keep their width
    let mut after_space = true;
    for piece in &doc.0 {
        match piece {
            Piece::Text { text, style } => {
                let text = keep_spaces(text, &mut after_space);
                StyledText {
                    text: &text,
                    style: *style,
                }
                .render_to(&mut out);
            }
            Piece::Indent(width) => {
                out.push_str(&"&nbsp;".repeat(*width));
                after_space = true;
            }
            Piece::Break => {
                html! { br; }.render_to(&mut out);
                after_space = true;
            }
        }
    }
    PreEscaped(out)
}

/// Replaces each space which follows a line start or another space with a
/// non-breaking space.
fn keep_spaces(text: &str, after_space: &mut bool) -> String {
    text.chars()
        .map(|c| {
            let keep = c == ' ' && *after_space;
            *after_space = c == ' ';
            if keep { NBSP } else { c }
        })
        .collect()
}

struct StyledText<'a> {
    text: &'a str,
    style: Style,
}

impl Render for StyledText<'_> {
    fn render(&self) -> Markup {
        let css = css(self.style);
        html! {
            @if css.is_empty() {
                (self.text)
            } @else {
                span style=(css) { (self.text) }
            }
        }
    }
}

fn css(style: Style) -> String {
    const BOLD: &str = "font-weight:bold;";
    const ITALIC: &str = "font-style:italic;";

    let mut css = String::from(match style.role {
        None => "",
        Some(Role::FunctionalLabel) => "color:green;font-weight:bold;",
        Some(Role::VerbDivider) => "color:blue;font-style:italic;text-decoration:underline;",
        Some(Role::SenseNumber) => "color:red;font-weight:bold;",
        Some(Role::CrossReference | Role::IllustrationMarker) => BOLD,
        Some(Role::Illustration | Role::DividerLabel) => ITALIC,
    });
    if style.bold && !css.contains(BOLD) {
        css.push_str(BOLD);
    }
    if style.italic && !css.contains(ITALIC) {
        css.push_str(ITALIC);
    }
    css
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            entry::Sense,
            render::{DocWriter, WriteDoc},
        },
        serde_json::json,
    };

    #[test]
    fn breaks_and_indents() {
        let mut w = DocWriter::new();
        w.styled(Role::SenseNumber, |w| w.text("1"));
        w.text(" ");
        w.indented(2, |w| w.text("a <b>\nc"));
        let html = w.finish().to_html().into_string();

        assert_eq!(
            html,
            "<span style=\"color:red;font-weight:bold;\">1</span> a &lt;b&gt;<br>&nbsp;&nbsp;c"
        );
    }

    #[test]
    fn blank_number_columns_keep_their_width() {
        let sense = Sense::parse(&json!({
            "sn": "b",
            "dt": [["text", "x\ny"]],
        }))
        .unwrap();
        let html = sense.to_doc().unwrap().to_html().into_string();

        assert_eq!(
            html,
            "<span style=\"color:red;font-weight:bold;\">\u{a0}\u{a0}b</span> x<br>&nbsp;&nbsp;&nbsp;&nbsp;y"
        );
    }

    #[test]
    fn repeated_spaces_are_kept() {
        let mut w = DocWriter::new();
        w.text("a  b ");
        w.styled(Role::Illustration, |w| w.text(" c"));
        let html = w.finish().to_html().into_string();

        assert_eq!(
            html,
            "a \u{a0}b <span style=\"font-style:italic;\">\u{a0}c</span>"
        );
    }

    #[test]
    fn emphasis_within_role_is_not_repeated() {
        let style = Style {
            role: Some(Role::Illustration),
            bold: true,
            italic: true,
        };
        assert_eq!(css(style), "font-style:italic;font-weight:bold;");

        let style = Style {
            role: Some(Role::SenseNumber),
            bold: true,
            italic: false,
        };
        assert_eq!(css(style), "color:red;font-weight:bold;");
    }
}
