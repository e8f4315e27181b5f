//! RDS blocks, groups, and the block error gate

use std::fmt;

/// Error-confidence level of a received block
///
/// The tuner's block decoder corrects errors with a shortened cyclic
/// code and reports how much correction each 16-bit block needed.
/// Levels are ordered: a block with `Low` errors is more trustworthy
/// than one with `Medium` errors, and `Unrecoverable` blocks carry no
/// usable data at all.
///
/// ```
/// use rdsoda::ErrorLevel;
///
/// assert!(ErrorLevel::None < ErrorLevel::Low);
/// assert!(ErrorLevel::Medium < ErrorLevel::Unrecoverable);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorLevel {
    /// No errors detected
    #[default]
    None,

    /// 1–2 bit errors detected and corrected
    Low,

    /// 3–5 bit errors detected and corrected
    Medium,

    /// 6 or more errors detected; the block is uncorrectable
    Unrecoverable,
}

/// One 16-bit RDS block with its error-confidence level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// Raw block value
    pub value: u16,

    /// How much error correction this block needed
    pub errors: ErrorLevel,
}

impl Block {
    /// New block with the given value and error level
    pub fn new(value: u16, errors: ErrorLevel) -> Self {
        Self { value, errors }
    }

    /// A block that was never recovered by the tuner
    ///
    /// The value reads as zero and the error level is
    /// [`Unrecoverable`](ErrorLevel::Unrecoverable).
    pub fn missing() -> Self {
        Self {
            value: 0,
            errors: ErrorLevel::Unrecoverable,
        }
    }
}

/// The four blocks (A–D) of one RDS group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blocks {
    pub a: Block,
    pub b: Block,
    pub c: Block,
    pub d: Block,
}

/// Group version: the B0 bit of block B
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupVersion {
    A,
    B,
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupVersion::A => "A".fmt(f),
            GroupVersion::B => "B".fmt(f),
        }
    }
}

/// RDS group type: code 0–15 plus version A or B
///
/// Displays in the conventional `"0A"` … `"15B"` notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupType {
    code: u8,
    version: GroupVersion,
}

impl GroupType {
    /// New group type; `None` if `code` exceeds 15
    pub fn new(code: u8, version: GroupVersion) -> Option<Self> {
        if code > 15 {
            return None;
        }
        Some(Self { code, version })
    }

    /// Extract the group type from a decoded block B value
    ///
    /// The type code occupies the top four bits and the version bit
    /// sits immediately below them. The caller is responsible for
    /// checking block B's error level first.
    pub fn from_block_b(value: u16) -> Self {
        Self {
            code: (value >> 12) as u8,
            version: if value & 0x0800 != 0 {
                GroupVersion::B
            } else {
                GroupVersion::A
            },
        }
    }

    /// Group type code, 0–15
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Group version
    pub fn version(&self) -> GroupVersion {
        self.version
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.code, self.version)
    }
}

/// Per-decoder error tolerance for the blocks it consults
///
/// Each decoder declares the maximum tolerable [`ErrorLevel`] for
/// every block letter it reads; blocks it never reads are exempt.
/// If any consulted block exceeds its limit, the whole group is
/// rejected for that decoder and no state is written.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BlockGate {
    pub(crate) b: Option<ErrorLevel>,
    pub(crate) c: Option<ErrorLevel>,
    pub(crate) d: Option<ErrorLevel>,
}

impl BlockGate {
    /// True if every consulted block is within its error limit
    pub(crate) fn admits(&self, blocks: &Blocks) -> bool {
        within(self.b, &blocks.b) && within(self.c, &blocks.c) && within(self.d, &blocks.d)
    }
}

fn within(limit: Option<ErrorLevel>, block: &Block) -> bool {
    match limit {
        Some(max) => block.errors <= max,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_from_block_b() {
        let gt = GroupType::from_block_b(0x3058);
        assert_eq!(3, gt.code());
        assert_eq!(GroupVersion::A, gt.version());
        assert_eq!("3A", &format!("{}", gt));

        let gt = GroupType::from_block_b(0x8800);
        assert_eq!(8, gt.code());
        assert_eq!(GroupVersion::B, gt.version());
        assert_eq!("8B", &format!("{}", gt));

        assert_eq!(None, GroupType::new(16, GroupVersion::A));
        assert_eq!("15B", &format!("{}", GroupType::from_block_b(0xF800)));
    }

    #[test]
    fn test_gate() {
        let gate = BlockGate {
            b: Some(ErrorLevel::Medium),
            c: Some(ErrorLevel::Medium),
            d: Some(ErrorLevel::Medium),
        };

        let mut blocks = Blocks::default();
        assert!(gate.admits(&blocks));

        blocks.c.errors = ErrorLevel::Medium;
        assert!(gate.admits(&blocks));

        blocks.c.errors = ErrorLevel::Unrecoverable;
        assert!(!gate.admits(&blocks));

        // block A is never consulted by these decoders
        blocks.c.errors = ErrorLevel::None;
        blocks.a.errors = ErrorLevel::Unrecoverable;
        assert!(gate.admits(&blocks));
    }

    #[test]
    fn test_gate_skips_unread_blocks() {
        let gate = BlockGate {
            b: None,
            c: Some(ErrorLevel::Medium),
            d: None,
        };

        let mut blocks = Blocks::default();
        blocks.b.errors = ErrorLevel::Unrecoverable;
        blocks.d.errors = ErrorLevel::Unrecoverable;
        assert!(gate.admits(&blocks));

        blocks.c.errors = ErrorLevel::Unrecoverable;
        assert!(!gate.admits(&blocks));
    }

    #[test]
    fn test_missing_block() {
        let blk = Block::missing();
        assert_eq!(0, blk.value);
        assert_eq!(ErrorLevel::Unrecoverable, blk.errors);
    }
}
