//! Known vendor System Exclusive formats that carry a checksum
//!
//! Order is priority: [`classify`](super::classify) picks the first entry whose pattern matches,
//! so more specific shapes sit before broader ones that would also accept the same bytes.

use super::{
    pattern::{Node, Pattern, Repeat},
    Format, FormatId,
};
use crate::checksum::Checksum;

use Node::{Alt, Any, In, Is, OneOf, Skip, Star};

/// Any byte with a zero high nibble, `0n`
const LOW_NIBBLE: Node = In(0x00, 0x0F);
/// Korg channel byte, `3n`
const KORG_CHANNEL: Node = In(0x30, 0x3F);

/// Every checksummed format, in match priority order
pub static FORMATS: &[Format] = &[
    Format {
        id: FormatId::RolandDataSet,
        pattern: Pattern {
            header: &[
                Is(0x41),
                Any,
                Star(0x00),
                Any,
                Alt(&[
                    &[In(0x11, 0x12)],
                    &[In(0x40, 0x42)],
                    &[Is(0x00), Is(0x12)],
                ]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    // 7f 1c is the XG-and-later sub-model prefix
    Format {
        id: FormatId::YamahaXgBulkDump,
        pattern: Pattern {
            header: &[
                Is(0x43),
                LOW_NIBBLE,
                Alt(&[&[Is(0x7F), Is(0x1C), Any], &[Is(0x7F), Any], &[Any]]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::YamahaGmParameterChange,
        pattern: Pattern {
            header: &[
                Is(0x43),
                Alt(&[&[In(0x10, 0x1F)], &[In(0x30, 0x3F)]]),
                OneOf(&[0x27, 0x2B, 0x44]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::YamahaDxBulkDump,
        pattern: Pattern {
            header: &[
                Is(0x43),
                LOW_NIBBLE,
                OneOf(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x09]),
                Skip(2),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    // Single-packet form only
    Format {
        id: FormatId::YamahaUniversalDump,
        pattern: Pattern {
            header: &[
                Is(0x43),
                LOW_NIBBLE,
                OneOf(&[0x0A, 0x0B, 0x7A, 0x7C, 0x7D, 0x7E]),
                Skip(2),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::YamahaPssBulkDump,
        pattern: Pattern {
            header: &[
                Is(0x43),
                Is(0x76),
                OneOf(&[0x00, 0x01, 0x02, 0x03, 0x07, 0x08, 0x09, 0x0A]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::YamahaPssCountedBulkDump,
        pattern: Pattern {
            header: &[
                Is(0x43),
                Is(0x76),
                OneOf(&[
                    0x0D, 0x0E, 0x11, 0x12, 0x13, 0x14, 0x16, 0x18, 0x1C, 0x1D, 0x1E, 0x1F, 0x20,
                    0x21,
                ]),
                Skip(2),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::KorgNSeriesDataDump,
        pattern: Pattern {
            header: &[
                Is(0x42),
                KORG_CHANNEL,
                OneOf(&[0x42, 0x4C]),
                Alt(&[&[In(0x30, 0x3C)], &[Is(0x7F)]]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::KorgWavestationDump,
        pattern: Pattern {
            header: &[
                Is(0x42),
                KORG_CHANNEL,
                Is(0x28),
                OneOf(&[
                    0x40, 0x49, 0x4C, 0x4D, 0x50, 0x51, 0x54, 0x55, 0x5A, 0x5C, 0x5D, 0x5E, 0x5F,
                    0x60, 0x61, 0x62,
                ]),
            ],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Additive,
    },
    Format {
        id: FormatId::CasioBulkParameterSend,
        pattern: Pattern {
            header: &[Is(0x44), Is(0x11), Skip(2), OneOf(&[0x02, 0x04]), Skip(8)],
            captured: &[],
            payload: Repeat::groups(3),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::CasioParameterSetBulkSend,
        pattern: Pattern {
            header: &[Is(0x44), Is(0x15), Skip(2), OneOf(&[0x04, 0x06]), Skip(8)],
            captured: &[],
            payload: Repeat::groups(3),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::TechnicsData,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x50), OneOf(&[0x2B, 0x2C, 0x2D, 0x7E])],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::SuzukiDataSet,
        pattern: Pattern {
            header: &[Is(0x55), Any, Is(0x42), Is(0x12)],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
    Format {
        id: FormatId::EmuProteusPresetData,
        pattern: Pattern {
            header: &[Is(0x18), OneOf(&[0x04, 0x0A, 0x0C]), Any, Is(0x01), Skip(2)],
            captured: &[],
            payload: Repeat::groups(2),
        },
        checksum: Checksum::Additive,
    },
    Format {
        id: FormatId::EmuProteus2000PresetDump,
        pattern: Pattern {
            header: &[
                Is(0x18),
                Is(0x0F),
                Any,
                Is(0x55),
                Is(0x10),
                OneOf(&[0x02, 0x04]),
                Skip(2),
            ],
            captured: &[],
            payload: Repeat::groups(2),
        },
        checksum: Checksum::OnesComplement,
    },
    Format {
        id: FormatId::SampleDataPacket,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x02), Any],
            payload: Repeat::exactly(1, 120),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::FileDumpDataPacket,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x07), Is(0x02), Skip(2)],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::TuningBulkDumpReply,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x08), Is(0x01), Any, Skip(16)],
            payload: Repeat::exactly(3, 128),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::KeyBasedTuningDump,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x08), Is(0x04), Skip(2), Skip(16)],
            payload: Repeat::exactly(3, 128),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::ScaleTuningDump1Byte,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x08), Is(0x05), Skip(2), Skip(16)],
            payload: Repeat::exactly(1, 12),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::ScaleTuningDump2Byte,
        pattern: Pattern {
            header: &[],
            captured: &[Is(0x7E), Any, Is(0x08), Is(0x06), Skip(2), Skip(16)],
            payload: Repeat::exactly(2, 12),
        },
        checksum: Checksum::Xor,
    },
    Format {
        id: FormatId::MidiVisualControl,
        pattern: Pattern {
            header: &[Is(0x7E), Any, Is(0x0C), Is(0x01)],
            captured: &[],
            payload: Repeat::groups(1),
        },
        checksum: Checksum::Roland,
    },
];
