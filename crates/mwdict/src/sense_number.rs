//! Compact sense number codes like `1`, `2 a` or `b (3)`.

use {
    crate::ParseError,
    regex::Regex,
    std::{fmt, str::FromStr, sync::LazyLock},
};

static FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<numeral>\d+)? ?(?<letter>[a-z])? ?(?<sub>\(\d+\))?$")
        .expect("sense number regex should be valid")
});

/// Position of a sense within its sense sequence.
///
/// Every part is optional, since a sense often only repeats the parts of its
/// number which changed from the previous sense, but at least one is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenseNumber {
    numeral: Option<String>,
    letter: Option<String>,
    sub: Option<String>,
}

impl SenseNumber {
    /// Parses a sense number code.
    ///
    /// # Errors
    ///
    /// Errors if `code` does not match the sense number format, or has none
    /// of its parts.
    pub fn parse(code: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSenseNumber(code.to_owned());
        let captures = FORMAT.captures(code).ok_or_else(invalid)?;
        let part = |name| captures.name(name).map(|m| m.as_str().to_owned());
        let number = Self {
            numeral: part("numeral"),
            letter: part("letter"),
            sub: part("sub"),
        };
        if number.numeral.is_none() && number.letter.is_none() && number.sub.is_none() {
            return Err(invalid());
        }
        Ok(number)
    }

    /// Top level numeral, e.g. `2`.
    #[must_use]
    pub fn numeral(&self) -> Option<&str> {
        self.numeral.as_deref()
    }

    /// Letter, e.g. `a`.
    #[must_use]
    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }

    /// Parenthesized numeral, e.g. `(3)`.
    #[must_use]
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}

impl FromStr for SenseNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats the number with absent leading parts kept as blank columns, so
/// that numbers in the same sequence line up.
impl fmt::Display for SenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = self.numeral().unwrap_or(" ");
        let letter = self.letter().unwrap_or(" ");
        match (&self.letter, &self.sub) {
            (_, Some(sub)) => write!(f, "{numeral} {letter} {sub}"),
            (Some(letter), None) => write!(f, "{numeral} {letter}"),
            (None, None) => f.write_str(numeral),
        }
    }
}
