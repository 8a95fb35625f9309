use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Delimiter
// ---------------------------------------------------------------------------

/// Field separator of a delimited text file.
///
/// Serializes as its literal character (`","`, `";"`, `"\t"`, `"|"`), and also
/// parses from the word `tab` so it can be written on a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Pick the delimiter of a file from its first line.
    ///
    /// Characters inside a double-quoted span are not counted. Ties resolve
    /// in favour of tab, then semicolon, then pipe, then comma.
    pub fn detect(line: &str) -> Self {
        let comma = count_unquoted(line, ',');
        let semicolon = count_unquoted(line, ';');
        let tab = count_unquoted(line, '\t');
        let pipe = count_unquoted(line, '|');

        if tab >= comma && tab >= semicolon && tab >= pipe {
            Delimiter::Tab
        } else if semicolon >= comma && semicolon >= pipe {
            Delimiter::Semicolon
        } else if pipe >= comma {
            Delimiter::Pipe
        } else {
            Delimiter::Comma
        }
    }

    /// Split one physical line into fields.
    ///
    /// A quoted span may contain the delimiter; `""` inside a quoted span is a
    /// literal quote. Fields are returned untrimmed.
    pub fn split_line(self, line: &str) -> Vec<String> {
        let delim = self.as_char();
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '"' {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if c == delim && !in_quotes {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        fields.push(current);
        fields
    }
}

/// Count `needle` outside double-quoted spans. Every `"` toggles the quote
/// state; the quotes need not balance.
fn count_unquoted(line: &str, needle: char) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == needle && !in_quotes {
            count += 1;
        }
    }
    count
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

/// Error returned when a string does not name a supported delimiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported delimiter '{0}' (expected one of , ; | tab)")]
pub struct ParseDelimiterError(String);

impl FromStr for Delimiter {
    type Err = ParseDelimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "\t" | "\\t" | "tab" => Ok(Delimiter::Tab),
            "|" | "pipe" => Ok(Delimiter::Pipe),
            other => Err(ParseDelimiterError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = ParseDelimiterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Delimiter> for String {
    fn from(value: Delimiter) -> Self {
        value.as_char().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_wins_a_tie_with_comma() {
        assert_eq!(Delimiter::detect("a\tb,c"), Delimiter::Tab);
    }

    #[test]
    fn semicolon_beats_comma_and_pipe_on_tie() {
        assert_eq!(Delimiter::detect("a;b,c|d"), Delimiter::Semicolon);
    }

    #[test]
    fn pipe_beats_comma_on_tie() {
        assert_eq!(Delimiter::detect("a|b,c"), Delimiter::Pipe);
    }

    #[test]
    fn comma_wins_when_most_frequent() {
        assert_eq!(Delimiter::detect("a,b,c;d"), Delimiter::Comma);
    }

    #[test]
    fn line_without_delimiters_detects_tab() {
        assert_eq!(Delimiter::detect("value"), Delimiter::Tab);
    }

    #[test]
    fn quoted_delimiters_are_not_counted() {
        assert_eq!(Delimiter::detect("\"a;b;c\",d,e"), Delimiter::Comma);
    }

    #[test]
    fn split_respects_quotes_and_escaped_quotes() {
        let fields = Delimiter::Comma.split_line(r#"1,"2,5","say ""hi""", x "#);
        assert_eq!(fields, vec!["1", "2,5", "say \"hi\"", " x "]);
    }

    #[test]
    fn split_keeps_trailing_empty_field() {
        assert_eq!(Delimiter::Semicolon.split_line("1;2;"), vec!["1", "2", ""]);
        assert_eq!(Delimiter::Pipe.split_line(""), vec![""]);
    }

    #[test]
    fn parses_from_names_and_characters() {
        assert_eq!("tab".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!("\t".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!("|".parse::<Delimiter>(), Ok(Delimiter::Pipe));
        assert!("#".parse::<Delimiter>().is_err());
    }
}
