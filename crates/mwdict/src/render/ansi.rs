use {
    super::{Doc, Piece, Role, Style},
    colored::{ColoredString, Colorize},
    std::fmt::Write as _,
};

pub fn paint(doc: &Doc) -> String {
    let mut out = String::new();
    for piece in &doc.0 {
        match piece {
            Piece::Text { text, style } => {
                _ = write!(out, "{}", styled(text, *style));
            }
            Piece::Indent(width) => out.extend(std::iter::repeat_n(' ', *width)),
            Piece::Break => out.push('\n'),
        }
    }
    out
}

fn styled(text: &str, style: Style) -> ColoredString {
    let mut text = match style.role {
        None => text.normal(),
        Some(Role::FunctionalLabel) => text.green().bold(),
        Some(Role::VerbDivider) => text.blue().italic().underline(),
        Some(Role::SenseNumber) => text.red().bold(),
        Some(Role::CrossReference | Role::IllustrationMarker) => text.bold(),
        Some(Role::Illustration | Role::DividerLabel) => text.italic(),
    };
    if style.bold {
        text = text.bold();
    }
    if style.italic {
        text = text.italic();
    }
    text
}

#[cfg(test)]
mod tests {
    use {super::*, crate::render::DocWriter};

    #[test]
    fn colors_sense_numbers() {
        colored::control::set_override(true);

        let mut w = DocWriter::new();
        w.styled(Role::SenseNumber, |w| w.text("1"));
        w.text(" plain");
        let painted = w.finish().to_ansi();
        colored::control::unset_override();

        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains('1'));
        assert!(painted.ends_with(" plain"));
    }

    #[test]
    fn emphasis_layers_on_role() {
        use colored::{Color, Styles};

        let text = styled(
            "x",
            Style {
                role: Some(Role::VerbDivider),
                bold: true,
                italic: false,
            },
        );
        assert_eq!(text.fgcolor(), Some(Color::Blue));
        assert!(text.style().contains(Styles::Italic));
        assert!(text.style().contains(Styles::Underline));
        assert!(text.style().contains(Styles::Bold));

        let text = styled("x", Style::default());
        assert_eq!(text.fgcolor(), None);
        assert!(!text.style().contains(Styles::Bold));
    }
}
