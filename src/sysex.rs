//! System Exclusive envelope validation and vendor format classification

use thiserror::Error;

use crate::checksum::Checksum;
use pattern::Pattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod pattern;

pub use catalog::FORMATS;

/// System Exclusive status byte
pub const EXCLUSIVE: u8 = 0xF0;
/// End of Exclusive status byte
pub const END_OF_EXCLUSIVE: u8 = 0xF7;

/// A manufacturer's ID. Can be either a 1 byte variant or 3 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ManufacturerId {
    /// One byte ID
    OneByte(u8),
    /// Three byte ID, the first byte is always `0x00`
    ThreeByte([u8; 3]),
}

impl ManufacturerId {
    /// Reads the ID that follows `F0` from a message's interior bytes, accepting only the ranges
    /// that are assigned or reserved for universal messages
    fn recognize(interior: &[u8]) -> Option<Self> {
        match *interior {
            [id @ (0x01..=0x5F | 0x7D..=0x7F), ..] => Some(Self::OneByte(id)),
            [0x00, group @ (0x00..=0x02 | 0x20..=0x22 | 0x40 | 0x48), id, ..] => {
                Some(Self::ThreeByte([0x00, group, id]))
            }
            _ => None,
        }
    }
}

/// Reasons a byte sequence is not a well formed System Exclusive message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// No bytes at all
    #[error("Empty message")]
    Empty,
    /// First byte is not `F0`
    #[error("Message does not start with System Exclusive 0xF0 byte")]
    MissingStart,
    /// Last byte is not `F7`
    #[error("Missing end of System Exclusive Message 0xF7 byte")]
    MissingEnd,
    /// An interior byte has its high bit set
    #[error("Byte {byte:#04x} at index {index} is not a data byte")]
    NotDataByte {
        /// Position in the message
        index: usize,
        /// The offending byte
        byte: u8,
    },
    /// Manufacturer ID is missing or outside the recognized ranges
    #[error("Unknown manufacturer ID")]
    UnknownManufacturer,
}

/// Checks the generic `F0 <manufacturer> <data...> F7` shape of a message
pub fn check_envelope(bytes: &[u8]) -> Result<ManufacturerId, EnvelopeError> {
    let (&first, rest) = bytes.split_first().ok_or(EnvelopeError::Empty)?;
    if first != EXCLUSIVE {
        return Err(EnvelopeError::MissingStart);
    }

    let Some((&END_OF_EXCLUSIVE, interior)) = rest.split_last() else {
        return Err(EnvelopeError::MissingEnd);
    };

    if let Some(index) = interior.iter().position(|byte| byte & 0x80 != 0) {
        return Err(EnvelopeError::NotDataByte {
            index: index + 1,
            byte: interior[index],
        });
    }

    ManufacturerId::recognize(interior).ok_or(EnvelopeError::UnknownManufacturer)
}

/// Names of the vendor formats in [`FORMATS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormatId {
    /// Roland Data Set and Data Request
    RolandDataSet,
    /// Yamaha XG and later synths, Bulk Dump
    YamahaXgBulkDump,
    /// Yamaha GM sound modules, Parameter Change and Bulk Dump Request
    YamahaGmParameterChange,
    /// Yamaha DX series, Bulk Dump
    YamahaDxBulkDump,
    /// Yamaha Universal Dump
    YamahaUniversalDump,
    /// Yamaha PSS, Bulk Dump
    YamahaPssBulkDump,
    /// Yamaha PSS, Bulk Dump with byte counts
    YamahaPssCountedBulkDump,
    /// Korg N series, Data Dump
    KorgNSeriesDataDump,
    /// Korg Wavestation, Dump
    KorgWavestationDump,
    /// Casio Oneway/Handshake Parameter Set Bulk Send (BDS/HDS)
    CasioBulkParameterSend,
    /// Casio Oneway/Handshake Bulk Parameter Set Send (OBS/HBS)
    CasioParameterSetBulkSend,
    /// Technics Data Request, Individual Data, Data Block and Continuing Data
    TechnicsData,
    /// Suzuki BH-1000, Data Set 1
    SuzukiDataSet,
    /// E-mu Proteus, Preset Data
    EmuProteusPresetData,
    /// E-mu Proteus 2000, Preset Dump Data
    EmuProteus2000PresetDump,
    /// Universal Sample Dump, Data Packet
    SampleDataPacket,
    /// Universal File Dump, Data Packet
    FileDumpDataPacket,
    /// MIDI Tuning Standard, Bulk Dump Reply
    TuningBulkDumpReply,
    /// MIDI Tuning Standard, Key-Based Tuning Dump
    KeyBasedTuningDump,
    /// MIDI Tuning Standard, Scale/Octave Tuning Dump in the 1-byte form
    ScaleTuningDump1Byte,
    /// MIDI Tuning Standard, Scale/Octave Tuning Dump in the 2-byte form
    ScaleTuningDump2Byte,
    /// Universal MIDI Visual Control
    MidiVisualControl,
}

impl FormatId {
    /// Human readable name of the format
    pub fn description(&self) -> &'static str {
        match self {
            Self::RolandDataSet => "Roland: Data Set and Request",
            Self::YamahaXgBulkDump => "Yamaha XG and later synths: Bulk Dump",
            Self::YamahaGmParameterChange => {
                "Yamaha GM sound modules: Parameter Change and Bulk Dump Request"
            }
            Self::YamahaDxBulkDump => "Yamaha DX series: Bulk Dump",
            Self::YamahaUniversalDump => "Yamaha Universal Dump",
            Self::YamahaPssBulkDump => "Yamaha PSS: Bulk Dump",
            Self::YamahaPssCountedBulkDump => "Yamaha PSS: Bulk Dump (with byte counts)",
            Self::KorgNSeriesDataDump => "Korg N series: Data Dump",
            Self::KorgWavestationDump => "Korg Wavestation: Dump",
            Self::CasioBulkParameterSend => "Casio: Parameter Set Bulk Send (BDS/HDS)",
            Self::CasioParameterSetBulkSend => "Casio: Bulk Parameter Set Send (OBS/HBS)",
            Self::TechnicsData => "Technics: Data Request, Individual Data, Data Block",
            Self::SuzukiDataSet => "Suzuki BH-1000: Data Set 1",
            Self::EmuProteusPresetData => "E-mu Proteus: Preset Data",
            Self::EmuProteus2000PresetDump => "E-mu Proteus 2000: Preset Dump Data",
            Self::SampleDataPacket => "Universal SysEx: Sample Data Packet",
            Self::FileDumpDataPacket => "Universal SysEx: File Dump Data Packet",
            Self::TuningBulkDumpReply => "MIDI Tuning Standard: Bulk Dump Reply",
            Self::KeyBasedTuningDump => "MIDI Tuning Standard: Key-Based Tuning Dump",
            Self::ScaleTuningDump1Byte => "MIDI Tuning Standard: Scale/Octave Tuning (1-byte)",
            Self::ScaleTuningDump2Byte => "MIDI Tuning Standard: Scale/Octave Tuning (2-byte)",
            Self::MidiVisualControl => "Universal SysEx: MIDI Visual Control",
        }
    }
}

impl core::fmt::Display for FormatId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write![f, "{}", self.description()]
    }
}

/// A vendor format: its shape and the checksum it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Which format this is
    pub id: FormatId,
    /// Structural pattern of the whole message
    pub pattern: Pattern,
    /// Algorithm over the checksummed range
    pub checksum: Checksum,
}

/// Checksum verdict for a message that matched a known format
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Verdict {
    /// The whole message
    pub bytes: Vec<u8>,
    /// The format that matched
    pub format: FormatId,
    /// Whether the embedded checksum disagrees with the computed one
    pub is_checksum_error: bool,
    /// Checksum byte found in the message, right before `F7`
    pub checksum: u8,
    /// Checksum computed over `range`
    pub calculated_checksum: u8,
    /// The checksummed bytes
    pub range: Vec<u8>,
    /// Offset of `range` within `bytes`
    pub range_index: usize,
}

/// Outcome of classifying a well formed System Exclusive message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Classification {
    /// No known format matched, so there is no checksum to verify
    Unrecognized {
        /// The whole message
        bytes: Vec<u8>,
    },
    /// A known format matched and its checksum was verified
    Matched(Verdict),
}

impl Classification {
    /// Whether the message carries a checksum this crate knows how to verify
    pub fn is_needed_checksum(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Whether a verified checksum turned out wrong
    pub fn is_checksum_error(&self) -> bool {
        matches!(self, Self::Matched(verdict) if verdict.is_checksum_error)
    }

    /// The classified message
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Unrecognized { bytes } => bytes,
            Self::Matched(verdict) => &verdict.bytes,
        }
    }
}

/// Classifies `bytes` against the known vendor formats and verifies the checksum of the first
/// format that matches.
///
/// Returns `None` when `bytes` is not a well formed System Exclusive message at all.
pub fn classify(bytes: &[u8]) -> Option<Classification> {
    if let Err(error) = check_envelope(bytes) {
        tracing::trace!(%error, "not a System Exclusive message");
        return None;
    }

    let Some((format, range)) = FORMATS
        .iter()
        .find_map(|format| format.pattern.capture(bytes).map(|range| (format, range)))
    else {
        return Some(Classification::Unrecognized {
            bytes: bytes.to_vec(),
        });
    };
    debug_assert_eq!(range.end, bytes.len() - 2);

    let checksum = bytes[range.end];
    let calculated_checksum = format.checksum.compute(&bytes[range.clone()]);
    let is_checksum_error = checksum != calculated_checksum;

    tracing::trace!(format = %format.id, range_index = range.start, "matched format");
    if is_checksum_error {
        tracing::debug!(
            format = %format.id,
            checksum,
            calculated_checksum,
            "checksum mismatch"
        );
    }

    Some(Classification::Matched(Verdict {
        bytes: bytes.to_vec(),
        format: format.id,
        is_checksum_error,
        checksum,
        calculated_checksum,
        range: bytes[range.clone()].to_vec(),
        range_index: range.start,
    }))
}
