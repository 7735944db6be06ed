//! Structural byte patterns for vendor System Exclusive formats
//!
//! A [`Pattern`] describes a whole message as
//!
//! ```text
//! F0 <header...> [ <captured...> <payload repeat> ] <checksum> F7
//! ```
//!
//! where the bracketed region is the checksummed range. Header and captured nodes may branch
//! ([`Node::Alt`]) or repeat ([`Node::Star`]); alternatives are tried leftmost first and stars
//! greedily, so the first capture found is the one a backtracking regular expression would find.

use std::ops::Range;

/// System Exclusive status byte
const EXCLUSIVE: u8 = 0xF0;
/// End of Exclusive
const END_OF_EXCLUSIVE: u8 = 0xF7;

/// One element of a structural pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Exactly this byte
    Is(u8),
    /// Any byte in the inclusive range
    In(u8, u8),
    /// Any of the listed bytes
    OneOf(&'static [u8]),
    /// Any single byte
    Any,
    /// Exactly `n` bytes of anything
    Skip(usize),
    /// Zero or more repetitions of this byte, greedy
    Star(u8),
    /// The first branch that lets the rest of the pattern match
    Alt(&'static [&'static [Node]]),
}

impl Node {
    /// Whether a single-byte node accepts `byte`
    fn accepts(&self, byte: u8) -> bool {
        match *self {
            Self::Is(expected) => byte == expected,
            Self::In(low, high) => (low..=high).contains(&byte),
            Self::OneOf(set) => set.contains(&byte),
            Self::Any => true,
            Self::Skip(_) | Self::Star(_) | Self::Alt(_) => false,
        }
    }
}

/// One or more repetitions of a fixed-width group of bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    /// Bytes per repetition
    pub width: usize,
    /// Fewest repetitions allowed, at least one
    pub min: usize,
    /// Most repetitions allowed, unbounded when `None`
    pub max: Option<usize>,
}

impl Repeat {
    /// `(..)+` style repeat of `width`-byte groups
    pub const fn groups(width: usize) -> Self {
        Self {
            width,
            min: 1,
            max: None,
        }
    }

    /// `(..){count}` style repeat of `width`-byte groups
    pub const fn exactly(width: usize, count: usize) -> Self {
        Self {
            width,
            min: count,
            max: Some(count),
        }
    }

    /// Whether `len` bytes can be covered by this repeat exactly
    fn fits(&self, len: usize) -> bool {
        if len == 0 || len % self.width != 0 {
            return false;
        }

        let count = len / self.width;
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

/// The full shape of a vendor message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Nodes between `F0` and the checksummed range
    pub header: &'static [Node],
    /// Fixed nodes at the start of the checksummed range
    pub captured: &'static [Node],
    /// The repeated payload that closes the checksummed range
    pub payload: Repeat,
}

impl Pattern {
    /// Matches the whole message and returns the checksummed range.
    ///
    /// The range always ends right before the checksum byte, which is itself followed by `F7`.
    pub fn capture(&self, bytes: &[u8]) -> Option<Range<usize>> {
        let checksum_index = bytes.len().checked_sub(2)?;
        if checksum_index == 0
            || bytes[0] != EXCLUSIVE
            || bytes[bytes.len() - 1] != END_OF_EXCLUSIVE
        {
            return None;
        }

        let mut start = None;
        walk(self.header, bytes, 1, checksum_index, &mut |header_end| {
            walk(self.captured, bytes, header_end, checksum_index, &mut |at| {
                let fits = self.payload.fits(checksum_index - at);
                if fits {
                    start = Some(header_end);
                }
                fits
            })
        });

        start.map(|start| start..checksum_index)
    }
}

/// Matches `nodes` against `bytes[pos..end]`, handing every candidate end position to `accept`
/// in priority order until it returns `true`
fn walk(
    nodes: &[Node],
    bytes: &[u8],
    pos: usize,
    end: usize,
    accept: &mut dyn FnMut(usize) -> bool,
) -> bool {
    let Some((node, rest)) = nodes.split_first() else {
        return accept(pos);
    };

    match *node {
        Node::Star(byte) => {
            let run = bytes[pos..end].iter().take_while(|b| **b == byte).count();
            (0..=run)
                .rev()
                .any(|taken| walk(rest, bytes, pos + taken, end, &mut *accept))
        }
        Node::Alt(branches) => branches.iter().any(|branch| {
            walk(branch, bytes, pos, end, &mut |next| {
                walk(rest, bytes, next, end, &mut *accept)
            })
        }),
        Node::Skip(n) => pos + n <= end && walk(rest, bytes, pos + n, end, accept),
        single => pos < end && single.accepts(bytes[pos]) && walk(rest, bytes, pos + 1, end, accept),
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, Pattern, Repeat};

    const ROLAND_LIKE: Pattern = Pattern {
        header: &[
            Node::Is(0x41),
            Node::Any,
            Node::Star(0x00),
            Node::Any,
            Node::Alt(&[
                &[Node::In(0x11, 0x12)],
                &[Node::In(0x40, 0x42)],
                &[Node::Is(0x00), Node::Is(0x12)],
            ]),
        ],
        captured: &[],
        payload: Repeat::groups(1),
    };

    #[test]
    fn capture_ends_before_checksum() {
        let message = [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x00, 0x7F, 0x00, 0x41, 0xF7];

        assert_eq!(ROLAND_LIKE.capture(&message), Some(5..9))
    }

    #[test]
    fn star_backtracks_into_the_model_byte() {
        // Device 10, model 00 00, command 12: the star must give back its last 00
        let message = [0xF0, 0x41, 0x10, 0x00, 0x00, 0x12, 0x01, 0x02, 0x7D, 0xF7];

        assert_eq!(ROLAND_LIKE.capture(&message), Some(6..8))
    }

    #[test]
    fn alternation_prefers_the_leftmost_branch() {
        let pattern = Pattern {
            header: &[Node::Alt(&[&[Node::Is(0x7F), Node::Any], &[Node::Any]])],
            captured: &[],
            payload: Repeat::groups(1),
        };
        let message = [0xF0, 0x7F, 0x1C, 0x05, 0x06, 0x00, 0xF7];

        assert_eq!(pattern.capture(&message), Some(3..5))
    }

    #[test]
    fn captured_nodes_belong_to_the_range() {
        let pattern = Pattern {
            header: &[],
            captured: &[Node::Is(0x50), Node::OneOf(&[0x2B, 0x2C, 0x2D, 0x7E])],
            payload: Repeat::groups(1),
        };
        let message = [0xF0, 0x50, 0x2C, 0x01, 0x02, 0x7F, 0xF7];

        assert_eq!(pattern.capture(&message), Some(1..5))
    }

    #[test]
    fn grouped_payload_must_divide_evenly() {
        let pattern = Pattern {
            header: &[Node::Is(0x44), Node::Skip(2)],
            captured: &[],
            payload: Repeat::groups(3),
        };

        let even = [0xF0, 0x44, 0x00, 0x00, 0x01, 0x02, 0x03, 0x00, 0xF7];
        let uneven = [0xF0, 0x44, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00, 0xF7];

        assert_eq!(pattern.capture(&even), Some(4..7));
        assert_eq!(pattern.capture(&uneven), None)
    }

    #[test]
    fn exact_repeat_rejects_other_counts() {
        let pattern = Pattern {
            header: &[Node::Is(0x7E)],
            captured: &[],
            payload: Repeat::exactly(2, 2),
        };

        assert!(pattern
            .capture(&[0xF0, 0x7E, 0x01, 0x02, 0x03, 0x04, 0x00, 0xF7])
            .is_some());
        assert!(pattern
            .capture(&[0xF0, 0x7E, 0x01, 0x02, 0x00, 0xF7])
            .is_none());
        assert!(pattern
            .capture(&[0xF0, 0x7E, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00, 0xF7])
            .is_none())
    }

    #[test]
    fn payload_is_never_empty() {
        let pattern = Pattern {
            header: &[Node::Is(0x41)],
            captured: &[],
            payload: Repeat::groups(1),
        };

        assert_eq!(pattern.capture(&[0xF0, 0x41, 0x00, 0xF7]), None)
    }
}
