//! The `NotationWriteable` trait is the way back from bytes to notation. Where
//! [`parse_notation`](crate::notation::parse_notation) reads notation *into* bytes,
//! `NotationWriteable` renders bytes as the plainest notation there is: lower-case two digit hex
//! separated by single spaces, such as `f0 41 10 42 12 40 00 7f 00 41 f7`. Feeding that text
//! back into the parser reproduces the same bytes.

use crate::{
    notation::Parsed,
    sysex::{Classification, Verdict},
};

/// A trait for types that can be rendered as hex notation
pub trait NotationWriteable {
    /// Converts the data to space separated two digit hex
    fn to_notation(&self) -> String;
}

impl NotationWriteable for u8 {
    fn to_notation(&self) -> String {
        format!("{self:02x}")
    }
}

impl NotationWriteable for [u8] {
    fn to_notation(&self) -> String {
        let mut notation = String::with_capacity(self.len() * 3);
        for (i, byte) in self.iter().enumerate() {
            if i > 0 {
                notation.push(' ');
            }
            notation.push_str(&byte.to_notation());
        }

        notation
    }
}

impl NotationWriteable for Vec<u8> {
    fn to_notation(&self) -> String {
        self.as_slice().to_notation()
    }
}

impl NotationWriteable for Parsed {
    fn to_notation(&self) -> String {
        self.bytes.to_notation()
    }
}

impl NotationWriteable for Verdict {
    fn to_notation(&self) -> String {
        self.bytes.to_notation()
    }
}

impl NotationWriteable for Classification {
    fn to_notation(&self) -> String {
        self.bytes().to_notation()
    }
}

#[cfg(test)]
mod tests {
    use super::NotationWriteable;
    use crate::{notation::parse_notation, sysex::classify};

    #[test]
    fn bytes_render_as_lower_case_pairs() {
        assert_eq!(0x0Au8.to_notation(), "0a");
        assert_eq!(
            vec![0xF0, 0x41, 0x00, 0x7F, 0xF7].to_notation(),
            "f0 41 00 7f f7"
        );
        assert_eq!(Vec::<u8>::new().to_notation(), "")
    }

    #[test]
    fn parsed_notation_saves_as_proper_hex() {
        let parsed = parse_notation("F0 41 10 42 12 B'01000000 D'0 +63 $00 \"A\" F7")
            .expect("Non-empty notation");
        assert!(parsed.is_valid());

        let rendered = parsed.to_notation();
        assert_eq!(rendered, "f0 41 10 42 12 40 00 7f 00 41 f7");

        let reparsed = parse_notation(&rendered).expect("Non-empty notation");
        assert_eq!(reparsed.bytes, parsed.bytes)
    }

    #[test]
    fn classification_renders_the_whole_message() {
        let message = [0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7];
        let classification = classify(&message).expect("GM System On is a SysEx");

        assert_eq!(classification.to_notation(), "f0 7e 7f 09 01 f7")
    }
}
