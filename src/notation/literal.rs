//! Numeric, hexadecimal and string literals
//!
//! Each rule looks only at the start of the remaining input. Markers (`B'`, `D'`, `0x`, `$`,
//! `H'`, the `h` suffix) and hex digits are case-insensitive.

use std::str::Chars;

use super::{is_line_terminator, NotationError, RuleResult, Token};

/// Hex prefixes, tried before the bare form
const HEX_PREFIXES: [&str; 3] = ["0x", "$", "h'"];

/// `→` in a string stands for `0x7E`, which many devices show as a right arrow
const RIGHT_ARROW: u32 = 0x2192;
/// `←` in a string stands for `0x7F`
const LEFT_ARROW: u32 = 0x2190;

/// `B'0101`, one byte in binary
pub fn binary(rest: &str) -> RuleResult {
    radix_literal(rest, b'b', 2)
}

/// `D'100`, one byte in decimal
pub fn decimal(rest: &str) -> RuleResult {
    radix_literal(rest, b'd', 10)
}

/// `+10` or `-3`, a signed decimal offset by 64
pub fn excess_64(rest: &str) -> RuleResult {
    if !matches!(rest.as_bytes().first(), Some(b'+' | b'-')) {
        return None;
    }

    let digits = run(&rest[1..], |b| b.is_ascii_digit());
    if digits == 0 || !is_word_boundary(rest, 1 + digits) {
        return None;
    }

    let literal = &rest[..1 + digits];
    let value = literal
        .parse::<i64>()
        .ok()
        .and_then(|value| value.checked_add(64));

    Some(single_byte(literal, value))
}

/// Hexadecimal bytes: `41`, `414243`, `0x41`, `$41`, `H'41`, `41h`.
///
/// The digits are either a group of one or two, or any number of complete pairs. Every pair is a
/// byte, and a lone digit is a byte of its own.
pub fn hex_run(rest: &str) -> RuleResult {
    let prefix = HEX_PREFIXES
        .iter()
        .find(|prefix| {
            rest.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
        .map(|prefix| prefix.len());

    prefix
        .into_iter()
        .chain([0])
        .find_map(|start| hex_digits(rest, start))
        .map(Ok)
}

/// Hex digits starting at `start`, trying group lengths the way a backtracking matcher would:
/// two digits, one digit, then the longest run of pairs down to a single pair
fn hex_digits(rest: &str, start: usize) -> Option<Token> {
    let available = run(&rest[start..], |b| b.is_ascii_hexdigit());
    let pairs = available / 2 * 2;

    let mut lengths = [2, 1]
        .into_iter()
        .filter(|len| *len <= available)
        .chain((2..=pairs).rev().step_by(2));

    lengths.find_map(|digits| {
        let end = start + digits;
        let suffixed = rest
            .as_bytes()
            .get(end)
            .is_some_and(|b| b.eq_ignore_ascii_case(&b'h'));
        let len = end + usize::from(suffixed);

        is_word_boundary(rest, len).then(|| Token {
            len,
            bytes: rest.as_bytes()[start..end]
                .chunks(2)
                .map(|group| group.iter().fold(0, |byte, digit| byte << 4 | nibble(*digit)))
                .collect(),
        })
    })
}

/// A double-quoted string on one line, each character one byte.
///
/// Supports the JSON escapes plus `\xHH`.
pub fn quoted(rest: &str) -> RuleResult {
    let body = rest.strip_prefix('"')?;

    let mut previous = '"';
    let mut close = None;
    for (at, c) in body.char_indices() {
        if is_line_terminator(c) {
            return None;
        }
        if c == '"' && previous != '\\' {
            close = Some(at);
            break;
        }
        previous = c;
    }

    let close = close?;
    let literal = &rest[..close + 2];

    let decoded = match unescape(&body[..close]) {
        Ok(decoded) => decoded,
        Err(e) => return Some(Err(e)),
    };

    let bytes = decoded
        .into_iter()
        .map(|code| match code {
            RIGHT_ARROW => Ok(0x7E),
            LEFT_ARROW => Ok(0x7F),
            code => u8::try_from(code).map_err(|_| out_of_range(literal)),
        })
        .collect::<Result<Vec<_>, _>>();

    Some(bytes.map(|bytes| Token {
        len: literal.len(),
        bytes,
    }))
}

/// Decodes the escapes in a string body into code points
fn unescape(body: &str) -> Result<Vec<u32>, NotationError> {
    let mut decoded = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        let code = match c {
            '\\' => match chars.next() {
                Some('"') => 0x22,
                Some('\\') => 0x5C,
                Some('/') => 0x2F,
                Some('b') => 0x08,
                Some('f') => 0x0C,
                Some('n') => 0x0A,
                Some('r') => 0x0D,
                Some('t') => 0x09,
                Some('u') => hex_escape(&mut chars, 4)?,
                Some('x' | 'X') => hex_escape(&mut chars, 2)?,
                _ => return Err(NotationError::MalformedString),
            },
            c if (c as u32) < 0x20 => return Err(NotationError::MalformedString),
            c => c as u32,
        };
        decoded.push(code);
    }

    Ok(decoded)
}

/// Reads exactly `digits` hex digits of an escape
fn hex_escape(chars: &mut Chars<'_>, digits: usize) -> Result<u32, NotationError> {
    (0..digits).try_fold(0, |code, _| {
        chars
            .next()
            .and_then(|c| c.to_digit(16))
            .map(|digit| code << 4 | digit)
            .ok_or(NotationError::MalformedString)
    })
}

/// `B'...` and `D'...` style literals
fn radix_literal(rest: &str, marker: u8, radix: u32) -> RuleResult {
    match rest.as_bytes() {
        [first, b'\'', ..] if first.eq_ignore_ascii_case(&marker) => {}
        _ => return None,
    }

    let digits = run(&rest[2..], |b| char::from(b).is_digit(radix));
    if digits == 0 || !is_word_boundary(rest, 2 + digits) {
        return None;
    }

    let literal = &rest[..2 + digits];
    let value = i64::from_str_radix(&literal[2..], radix).ok();

    Some(single_byte(literal, value))
}

/// Narrows a decoded literal to one byte
pub(crate) fn single_byte(literal: &str, value: Option<i64>) -> Result<Token, NotationError> {
    value
        .and_then(|value| u8::try_from(value).ok())
        .map(|byte| Token {
            len: literal.len(),
            bytes: vec![byte],
        })
        .ok_or_else(|| out_of_range(literal))
}

/// Out of range error for `literal`
fn out_of_range(literal: &str) -> NotationError {
    NotationError::OutOfRange {
        literal: literal.to_owned(),
    }
}

/// Length of the leading run of bytes satisfying `accept`
fn run(s: &str, accept: impl Fn(u8) -> bool) -> usize {
    s.bytes().take_while(|b| accept(*b)).count()
}

/// Whether a word ends at `at`. The byte before `at` is always a word character here
fn is_word_boundary(rest: &str, at: usize) -> bool {
    !rest
        .as_bytes()
        .get(at)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Value of an ASCII hex digit
fn nibble(digit: u8) -> u8 {
    debug_assert!(digit.is_ascii_hexdigit());
    char::from(digit).to_digit(16).unwrap_or_default() as u8
}
