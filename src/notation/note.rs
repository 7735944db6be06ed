//! Note names as MIDI note numbers, `o4c` is middle C (60)

use super::{literal::single_byte, NotationError, RuleResult};

/// Semitone offset of every spelling a note name may use. `#` is read as `+`
const SEMITONES: [(&str, i64); 17] = [
    ("c", 0),
    ("c+", 1),
    ("d-", 1),
    ("d", 2),
    ("d+", 3),
    ("e-", 3),
    ("e", 4),
    ("f", 5),
    ("f+", 6),
    ("g-", 6),
    ("g", 7),
    ("g+", 8),
    ("a-", 8),
    ("a", 9),
    ("a+", 10),
    ("b-", 10),
    ("b", 11),
];

/// `o<octave><note>[accidental]`, e.g. `o4c`, `o-1g#`, `O3B-`
pub fn note_name(rest: &str) -> RuleResult {
    let bytes = rest.as_bytes();
    if !bytes.first()?.eq_ignore_ascii_case(&b'o') {
        return None;
    }

    let sign = usize::from(bytes.get(1) == Some(&b'-'));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let letter = 1 + sign + digits;
    if !bytes
        .get(letter)
        .is_some_and(|b| b"cdefgab".contains(&b.to_ascii_lowercase()))
    {
        return None;
    }

    let accidental = bytes
        .get(letter + 1)
        .is_some_and(|b| matches!(b, b'#' | b'+' | b'-'));
    let len = letter + 1 + usize::from(accidental);

    let name = &rest[letter..len];
    let Some(offset) = semitone(name) else {
        return Some(Err(NotationError::UnknownNote(name.to_owned())));
    };

    let value = rest[1..letter]
        .parse::<i64>()
        .ok()
        .and_then(|octave| octave.checked_add(1)?.checked_mul(12)?.checked_add(offset));

    Some(single_byte(&rest[..len], value))
}

/// Looks a note spelling up in [`SEMITONES`]
fn semitone(name: &str) -> Option<i64> {
    let spelling = name.to_ascii_lowercase().replace('#', "+");

    SEMITONES
        .iter()
        .find(|(known, _)| *known == spelling)
        .map(|(_, offset)| *offset)
}

#[cfg(test)]
mod tests {
    use super::note_name;
    use crate::notation::{NotationError, Token};

    /// The single byte a note name decodes to
    fn note(input: &str) -> u8 {
        match note_name(input) {
            Some(Ok(Token { bytes, .. })) => bytes[0],
            other => panic!("`{input}` is not a note: {other:?}"),
        }
    }

    #[test]
    fn octave_numbering_puts_middle_c_in_octave_4() {
        assert_eq!(note("o5c"), 72);
        assert_eq!(note("o4c"), 60);
        assert_eq!(note("o4a"), 69);
        assert_eq!(note("o-1c"), 0);
        assert_eq!(note("o9g"), 127);
        assert_eq!(note("o20c"), 252)
    }

    #[test]
    fn sharps_and_flats() {
        assert_eq!(note("o4c#"), 61);
        assert_eq!(note("o4c+"), 61);
        assert_eq!(note("o4d-"), 61);
        assert_eq!(note("o4b-"), 70);
        assert_eq!(note("O4G#"), 68)
    }

    #[test]
    fn name_length_includes_the_accidental() {
        assert_eq!(note_name("o4cd").map(|t| t.map(|t| t.len)), Some(Ok(3)));
        assert_eq!(note_name("o-1g#").map(|t| t.map(|t| t.len)), Some(Ok(5)))
    }

    #[test]
    fn accidentals_without_a_semitone_stop_parsing() {
        assert_eq!(
            note_name("o4e+"),
            Some(Err(NotationError::UnknownNote("e+".into())))
        );
        assert_eq!(
            note_name("o4C-"),
            Some(Err(NotationError::UnknownNote("C-".into())))
        )
    }

    #[test]
    fn notes_beyond_a_byte_are_out_of_range() {
        assert_eq!(
            note_name("o21c"),
            Some(Err(NotationError::OutOfRange {
                literal: "o21c".into()
            }))
        );
        assert!(matches!(
            note_name("o-2b"),
            Some(Err(NotationError::OutOfRange { .. }))
        ))
    }

    #[test]
    fn not_a_note() {
        assert_eq!(note_name("o4"), None);
        assert_eq!(note_name("o-c"), None);
        assert_eq!(note_name("oc"), None);
        assert_eq!(note_name("o4h"), None)
    }
}
