//! # sysex-notation
//!
//! A small, side-effect free library for authoring and checking MIDI System Exclusive messages.
//! It turns hand-written SysEx notation into raw bytes, and tells you whether a raw message is
//! one of the vendor formats it knows and whether that message's checksum is right.
//!
//! ## Overview
//!
//! The crate is one pipeline in two halves:
//!
//! - **Notation → bytes**: [`parse_notation`] reads hex (`F0 41`, `0x41`, `$41`, `H'41`, `41h`),
//!   binary (`B'0101`), decimal (`D'100`), excess-64 (`+10`), note names (`o4c`) and quoted text
//!   (`"GS"`), skipping whitespace, commas and C style comments.
//! - **Bytes → verdict**: [`classify`] checks the generic `F0 ... F7` envelope, finds the first
//!   known vendor format that matches, and recomputes its checksum.
//!
//! - **Minimal dependencies**: only `thiserror` and `tracing` by default, opt in to serde support
//!   with the `serde` feature.
//! - **Pure**: no I/O and no shared mutable state. The format catalog is a `static` table.
//!
//! ## Example Usage
//!
//! ```rust
//! use sysex_notation::{classify, parse_notation, sysex::Classification};
//!
//! // GS Reset, written by hand
//! let parsed = parse_notation("F0 41 10 42 12 /* addr */ 40 00 7F /* data */ 00 41 F7")
//!     .expect("Notation is not empty");
//! assert!(parsed.is_valid());
//!
//! match classify(&parsed.bytes) {
//!     Some(Classification::Matched(verdict)) => {
//!         println!("{}: checksum ok = {}", verdict.format, !verdict.is_checksum_error)
//!     }
//!     Some(Classification::Unrecognized { .. }) => println!("SysEx without a known checksum"),
//!     None => println!("Not a SysEx message"),
//! }
//! ```
//!
//! ## Library Structure
//!
//! - **[`notation`]**: The notation tokenizer, its [`Parsed`](notation::Parsed) result and
//!   [`NotationError`](notation::NotationError).
//! - **[`sysex`]**: Envelope validation, the vendor format catalog and the classifier.
//! - **[`checksum`]**: The additive, Roland and XOR checksum algorithms.
//! - **[`writer`]**: Renders bytes back into hex notation.
//!

pub mod checksum;
pub mod notation;
pub mod sysex;
pub mod writer;

pub use notation::parse_notation;
pub use sysex::classify;
