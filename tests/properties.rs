//! Property tests for the notation tokenizer and the SysEx classifier.
//!
//! These check that parsing and classification never panic, that parse results are internally
//! consistent, that hex notation round-trips and that single byte corruption is caught by the
//! checksums.

use proptest::prelude::*;

use sysex_notation::{
    checksum, classify, parse_notation,
    sysex::{Classification, FormatId},
    writer::NotationWriteable,
};

// ============================================================================
// Strategies
// ============================================================================

/// Data bytes, high bit clear
fn data_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..0x80, 1..max_len)
}

/// One byte written in any of the numeric literal forms
fn literal(byte: u8) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(format!("{byte:02X}")),
        Just(format!("0x{byte:02x}")),
        Just(format!("${byte:02X}")),
        Just(format!("H'{byte:02x}")),
        Just(format!("{byte:02x}h")),
        Just(format!("D'{byte}")),
        Just(format!("B'{byte:b}")),
    ]
}

/// Notation for a run of bytes, mixing literal forms and separators
fn notation() -> impl Strategy<Value = (Vec<u8>, String)> {
    prop::collection::vec(any::<u8>().prop_flat_map(|b| (Just(b), literal(b))), 1..24).prop_map(
        |pairs| {
            let bytes = pairs.iter().map(|(b, _)| *b).collect();
            let text = pairs
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join(", ");
            (bytes, text)
        },
    )
}

/// A Roland Data Set 1 message with a correct checksum, and where its payload starts
fn roland_message() -> impl Strategy<Value = (Vec<u8>, usize)> {
    (0u8..0x80, data_bytes(32)).prop_map(|(device, payload)| {
        let mut message = vec![0xF0, 0x41, device, 0x42, 0x12];
        message.extend(&payload);
        message.push(checksum::roland(&payload));
        message.push(0xF7);
        (message, 5)
    })
}

/// A Technics message with a correct XOR checksum, and where its payload starts
fn technics_message() -> impl Strategy<Value = (Vec<u8>, usize)> {
    data_bytes(32).prop_map(|payload| {
        let mut message = vec![0xF0, 0x50, 0x2B];
        message.extend(&payload);
        let sum = checksum::xor(&message[1..]);
        message.extend([sum, 0xF7]);
        (message, 3)
    })
}

// ============================================================================
// 1. Tokenizer consistency
// ============================================================================

proptest! {
    /// Arbitrary text never panics, and validity always agrees with the index.
    #[test]
    fn validity_agrees_with_index(input in "\\PC{1,64}") {
        let parsed = parse_notation(&input).expect("Non-empty input");

        prop_assert!(parsed.index <= input.len());
        prop_assert!(input.is_char_boundary(parsed.index));
        prop_assert_eq!(parsed.is_valid(), parsed.index == input.len());
        prop_assert_eq!(parsed.is_valid(), parsed.error.is_none());
    }

    /// Text built from the grammar's own alphabet is just as consistent.
    #[test]
    fn grammar_soup_is_consistent(input in "[0-9a-fA-FxXhHbBdDo$'+\\-#\" ,/*\n]{1,48}") {
        let parsed = parse_notation(&input).expect("Non-empty input");

        prop_assert_eq!(parsed.is_valid(), parsed.index == input.len());
    }

    /// Parsing the same text twice gives the same answer.
    #[test]
    fn parsing_is_deterministic(input in "\\PC{1,32}") {
        prop_assert_eq!(parse_notation(&input), parse_notation(&input));
    }
}

// ============================================================================
// 2. Round trips
// ============================================================================

proptest! {
    /// Mixed literal forms decode to the bytes they were written from.
    #[test]
    fn written_literals_decode((bytes, text) in notation()) {
        let parsed = parse_notation(&text).expect("Non-empty input");

        prop_assert!(parsed.is_valid(), "`{}` stopped at {}", text, parsed.index);
        prop_assert_eq!(parsed.bytes, bytes);
    }

    /// Rendering parsed bytes as hex and parsing that again reproduces them.
    #[test]
    fn hex_rendering_round_trips((_, text) in notation()) {
        let parsed = parse_notation(&text).expect("Non-empty input");
        let rendered = parsed.to_notation();
        let reparsed = parse_notation(&rendered).expect("Non-empty rendering");

        prop_assert!(reparsed.is_valid());
        prop_assert_eq!(reparsed.bytes, parsed.bytes);
    }
}

// ============================================================================
// 3. Classification
// ============================================================================

proptest! {
    /// Arbitrary bytes never panic, and anything classified has a SysEx envelope.
    #[test]
    fn classification_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Some(classification) = classify(&bytes) {
            prop_assert_eq!(bytes.first(), Some(&0xF0));
            prop_assert_eq!(bytes.last(), Some(&0xF7));
            prop_assert_eq!(classification.bytes(), &bytes[..]);
        }
    }

    /// The same message always picks the same format.
    #[test]
    fn classification_is_deterministic((message, _) in roland_message()) {
        prop_assert_eq!(classify(&message), classify(&message));
    }

    /// Correct Roland checksums pass, and changing one payload byte breaks them.
    #[test]
    fn roland_checksum_catches_one_changed_byte(
        (mut message, start) in roland_message(),
        pick in any::<prop::sample::Index>(),
        delta in 1u8..0x80,
    ) {
        let Some(Classification::Matched(verdict)) = classify(&message) else {
            return Err(TestCaseError::fail("Roland message did not match"));
        };
        prop_assert_eq!(verdict.format, FormatId::RolandDataSet);
        prop_assert_eq!(verdict.range_index, start);
        prop_assert!(!verdict.is_checksum_error);

        let at = start + pick.index(message.len() - start - 2);
        message[at] = (message[at] + delta) & 0x7F;

        prop_assert_eq!(classify(&message).map(|c| c.is_checksum_error()), Some(true));
    }

    /// Correct XOR checksums pass, and changing one payload byte breaks them.
    #[test]
    fn xor_checksum_catches_one_changed_byte(
        (mut message, start) in technics_message(),
        pick in any::<prop::sample::Index>(),
        flip in 1u8..0x80,
    ) {
        let Some(Classification::Matched(verdict)) = classify(&message) else {
            return Err(TestCaseError::fail("Technics message did not match"));
        };
        prop_assert_eq!(verdict.format, FormatId::TechnicsData);
        prop_assert!(!verdict.is_checksum_error);

        let at = start + pick.index(message.len() - start - 2);
        message[at] ^= flip;

        prop_assert_eq!(classify(&message).map(|c| c.is_checksum_error()), Some(true));
    }
}
