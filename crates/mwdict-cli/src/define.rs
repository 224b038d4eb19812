use {
    crate::Format,
    mwdict::{Definition, Lookup},
    tracing::{error, warn},
};

pub fn print_lookup(lookup: &Lookup, format: Format) {
    for err in lookup.errors() {
        error!("{err}");
    }
    for (index, definition) in lookup.rendered().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", format_definition(definition, format));
    }
}

fn format_definition(definition: &Definition, format: Format) -> String {
    let mut out = String::new();
    if !definition.audio.is_empty() {
        for link in &definition.audio {
            out.push_str(link);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&format.paint(&definition.doc));
    out
}

pub fn print_suggestions(word: &str, suggestions: &[String]) {
    warn!("{word:?} was not found");
    if suggestions.is_empty() {
        return;
    }
    println!("Did you mean:");
    for suggestion in suggestions {
        println!("  {suggestion}");
    }
}
