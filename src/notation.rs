//! Textual notation for System Exclusive messages
//!
//! Notation is a free mix of literals separated by whitespace, commas or comments:
//!
//! ```text
//! F0 41 10 42 12          // hex, one byte per 2-digit group
//! 0x40 $00 H'7F 00h       /* hex with prefixes or suffix */
//! B'0101 D'100 +10 -3     // binary, decimal, excess-64
//! o4c o3a# o5b-           // note numbers
//! "GS\x20A→"         // quoted text, one byte per character
//! ```
//!
//! [`parse_notation`] never fails loudly: it decodes as far as it can and reports where and why it
//! stopped.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod literal;
pub mod note;

/// Reasons notation stopped being parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NotationError {
    /// A literal decodes to a value outside `0..=255`
    #[error("`{literal}` does not fit in a byte")]
    OutOfRange {
        /// The literal as written
        literal: String,
    },
    /// Note name with an accidental that has no semitone, such as `e+`
    #[error("Unknown note name `{0}`")]
    UnknownNote(String),
    /// Quoted string with a bad escape or a raw control character
    #[error("Malformed string literal")]
    MalformedString,
    /// Nothing in the grammar matches at this position
    #[error("Unrecognized notation")]
    Unrecognized,
}

/// Bytes decoded from notation, and how far decoding got
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parsed {
    /// Every byte decoded before parsing finished or stopped
    pub bytes: Vec<u8>,
    /// Byte offset into the input where parsing finished or stopped
    pub index: usize,
    /// Why parsing stopped early, `None` when the whole input was consumed
    pub error: Option<NotationError>,
}

impl Parsed {
    /// Whether the whole input was consumed
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// A literal recognized at the start of the remaining input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Length of the literal in bytes of input
    pub len: usize,
    /// Bytes the literal stands for, empty for separators and comments
    pub bytes: Vec<u8>,
}

impl Token {
    /// A token that only advances the scan
    fn skip(len: usize) -> Self {
        Self { len, bytes: vec![] }
    }
}

/// What a grammar rule made of the remaining input. `None` means the rule does not apply, while
/// an error stops parsing altogether
pub type RuleResult = Option<Result<Token, NotationError>>;

/// A single grammar rule, tried against the remaining input
type Rule = fn(&str) -> RuleResult;

/// Grammar rules in priority order
const RULES: [Rule; 9] = [
    separators,
    block_comment,
    line_comment,
    literal::binary,
    literal::decimal,
    literal::excess_64,
    literal::hex_run,
    note::note_name,
    literal::quoted,
];

/// Parses notation into bytes.
///
/// Returns `None` for empty input. Otherwise literals are decoded left to right until the input
/// runs out, a literal is out of range, or nothing matches.
pub fn parse_notation(input: &str) -> Option<Parsed> {
    if input.is_empty() {
        return None;
    }

    let mut bytes = vec![];
    let mut index = 0;
    let mut error = None;

    while index < input.len() {
        let rest = &input[index..];
        match RULES.iter().find_map(|rule| rule(rest)) {
            Some(Ok(token)) => {
                debug_assert!(token.len > 0 && rest.is_char_boundary(token.len));
                bytes.extend(token.bytes);
                index += token.len;
            }
            Some(Err(e)) => {
                error = Some(e);
                break;
            }
            None => {
                error = Some(NotationError::Unrecognized);
                break;
            }
        }
    }

    debug_assert_eq!(error.is_none(), index == input.len());
    if let Some(error) = &error {
        tracing::debug!(index, %error, "notation parsing stopped");
    }

    Some(Parsed {
        bytes,
        index,
        error,
    })
}

/// Whitespace as ECMAScript's `\s` defines it
fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// ECMAScript line terminators, which `.` never matches
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Run of whitespace and commas
fn separators(rest: &str) -> RuleResult {
    let len = rest
        .find(|c: char| !(is_space(c) || c == ','))
        .unwrap_or(rest.len());

    (len > 0).then(|| Ok(Token::skip(len)))
}

/// `/* ... */`, possibly spanning lines
fn block_comment(rest: &str) -> RuleResult {
    let body = rest.strip_prefix("/*")?;
    let end = body.find("*/")?;

    Some(Ok(Token::skip(2 + end + 2)))
}

/// `// ...` up to and including the line break, or to the end of input
fn line_comment(rest: &str) -> RuleResult {
    let body = rest.strip_prefix("//")?;

    let len = match body.char_indices().find(|(_, c)| is_line_terminator(*c)) {
        Some((at, c @ ('\n' | '\r'))) => 2 + at + c.len_utf8(),
        Some(_) => return None,
        None => rest.len(),
    };

    Some(Ok(Token::skip(len)))
}
