//! Line-level value types: hexagram numbers, line positions, line patterns,
//! and changing-line sets.
//!
//! Positions are numbered the traditional way: position 1 is the bottom line
//! and position 6 the top. A pattern written as a sequence lists the lines
//! from the top down, so position `p` sits at sequence index `6 - p`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A hexagram number in 1..=64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HexagramNumber(u8);

impl HexagramNumber {
    /// The lowest valid hexagram number.
    pub const MIN: u8 = 1;
    /// The highest valid hexagram number.
    pub const MAX: u8 = 64;
    /// Hexagram 1, Qian.
    pub const CREATIVE: Self = Self(1);
    /// Hexagram 2, Kun.
    pub const RECEPTIVE: Self = Self(2);

    /// Validate a raw hexagram number.
    pub fn new(n: u8) -> CoreResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(CoreError::InvalidNumber(n))
        }
    }

    /// The raw number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, for table storage.
    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All 64 hexagram numbers in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for HexagramNumber {
    type Error = CoreError;

    fn try_from(n: u8) -> CoreResult<Self> {
        Self::new(n)
    }
}

impl From<HexagramNumber> for u8 {
    fn from(n: HexagramNumber) -> Self {
        n.0
    }
}

impl std::fmt::Display for HexagramNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line position in 1..=6, counted from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LinePosition(u8);

impl LinePosition {
    /// The bottom line.
    pub const BOTTOM: Self = Self(1);
    /// The top line.
    pub const TOP: Self = Self(6);

    /// Validate a raw line position.
    pub fn new(p: u8) -> CoreResult<Self> {
        if (1..=6).contains(&p) {
            Ok(Self(p))
        } else {
            Err(CoreError::InvalidLinePosition(p))
        }
    }

    /// The raw position.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index of this line in a top-down sequence (`6 - position`).
    pub const fn top_down_index(self) -> usize {
        (6 - self.0) as usize
    }

    const fn mask(self) -> u8 {
        1 << (self.0 - 1)
    }

    /// All six positions, bottom to top.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (1..=6).map(Self)
    }
}

impl TryFrom<u8> for LinePosition {
    type Error = CoreError;

    fn try_from(p: u8) -> CoreResult<Self> {
        Self::new(p)
    }
}

impl From<LinePosition> for u8 {
    fn from(p: LinePosition) -> Self {
        p.0
    }
}

impl std::fmt::Display for LinePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line: yielding (broken) or firm (solid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Yielding, broken line (0).
    Yin,
    /// Firm, solid line (1).
    Yang,
}

impl Line {
    /// The binary value of the line.
    pub const fn value(self) -> u8 {
        match self {
            Self::Yin => 0,
            Self::Yang => 1,
        }
    }

    /// The opposite line.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Yin => Self::Yang,
            Self::Yang => Self::Yin,
        }
    }

    /// Monogram glyph for display.
    pub const fn glyph(self) -> char {
        match self {
            Self::Yin => '⚋',
            Self::Yang => '⚊',
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yin => write!(f, "yin"),
            Self::Yang => write!(f, "yang"),
        }
    }
}

/// A six-line pattern.
///
/// Stored as a bitmask where bit `p - 1` holds the line at position `p`
/// (1 = yang). Serialized as a top-down array of six 0/1 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 6]", into = "[u8; 6]")]
pub struct Lines(u8);

impl Lines {
    /// Number of distinct six-line patterns.
    pub const COUNT: usize = 64;

    /// Build a pattern from a top-down sequence of 0/1 values.
    pub fn from_top_down(values: [u8; 6]) -> CoreResult<Self> {
        let mut bits = 0u8;
        for (index, value) in values.into_iter().enumerate() {
            match value {
                0 => {}
                1 => bits |= 1 << (5 - index),
                other => return Err(CoreError::InvalidLineValue(other)),
            }
        }
        Ok(Self(bits))
    }

    /// The pattern as a top-down sequence of 0/1 values.
    pub fn to_top_down(self) -> [u8; 6] {
        let mut values = [0u8; 6];
        for pos in LinePosition::all() {
            values[pos.top_down_index()] = self.line(pos).value();
        }
        values
    }

    /// Build a pattern from its bitmask, if it fits in six bits.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (usize::from(bits) < Self::COUNT).then_some(Self(bits))
    }

    /// Build a pattern from per-position lines, bottom line first.
    pub fn from_bottom_up(lines: [Line; 6]) -> Self {
        LinePosition::all()
            .zip(lines)
            .filter(|&(_, line)| line == Line::Yang)
            .fold(Self(0), |acc, (pos, _)| Self(acc.0 | pos.mask()))
    }

    /// The raw bitmask (bit `p - 1` = position `p`).
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Stack an upper trigram over a lower one (each a 3-bit mask, bottom line in bit 0).
    pub const fn from_trigram_bits(upper: u8, lower: u8) -> Self {
        Self(((upper & 0b111) << 3) | (lower & 0b111))
    }

    /// The lower trigram's bits (positions 1-3).
    pub const fn lower_bits(self) -> u8 {
        self.0 & 0b111
    }

    /// The upper trigram's bits (positions 4-6).
    pub const fn upper_bits(self) -> u8 {
        self.0 >> 3
    }

    /// The line at a position.
    pub const fn line(self, pos: LinePosition) -> Line {
        if self.0 & pos.mask() == 0 {
            Line::Yin
        } else {
            Line::Yang
        }
    }

    /// Flip the line at one position.
    pub const fn flip(self, pos: LinePosition) -> Self {
        Self(self.0 ^ pos.mask())
    }

    /// Flip every line in a changing set.
    pub fn apply(self, changes: ChangingLines) -> Self {
        changes.iter().fold(self, Self::flip)
    }

    /// Iterate over all 64 patterns in bitmask order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<[u8; 6]> for Lines {
    type Error = CoreError;

    fn try_from(values: [u8; 6]) -> CoreResult<Self> {
        Self::from_top_down(values)
    }
}

impl From<Lines> for [u8; 6] {
    fn from(lines: Lines) -> Self {
        lines.to_top_down()
    }
}

impl std::fmt::Display for Lines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in self.to_top_down() {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// A set of changing line positions (0 to 6 members).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct ChangingLines(u8);

impl ChangingLines {
    /// The empty set: nothing changes.
    pub const fn none() -> Self {
        Self(0)
    }

    /// Every line changes.
    pub const fn all() -> Self {
        Self(0b11_1111)
    }

    /// Build a set from raw positions, rejecting anything outside 1..=6.
    pub fn from_values(values: &[u8]) -> CoreResult<Self> {
        values
            .iter()
            .map(|&p| LinePosition::new(p))
            .collect::<CoreResult<Self>>()
    }

    /// Add a position to the set.
    pub fn insert(&mut self, pos: LinePosition) {
        self.0 |= pos.mask();
    }

    /// Whether the position is in the set.
    pub const fn contains(self, pos: LinePosition) -> bool {
        self.0 & pos.mask() != 0
    }

    /// Number of changing lines.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no line changes.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The highest changing position, if any.
    pub fn highest(self) -> Option<LinePosition> {
        self.iter().last()
    }

    /// Positions in ascending order.
    pub fn iter(self) -> impl DoubleEndedIterator<Item = LinePosition> {
        LinePosition::all().filter(move |&p| self.contains(p))
    }

    /// Raw positions in ascending order.
    pub fn to_vec(self) -> Vec<u8> {
        self.iter().map(LinePosition::get).collect()
    }
}

impl FromIterator<LinePosition> for ChangingLines {
    fn from_iter<I: IntoIterator<Item = LinePosition>>(iter: I) -> Self {
        let mut set = Self::none();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl TryFrom<Vec<u8>> for ChangingLines {
    type Error = CoreError;

    fn try_from(values: Vec<u8>) -> CoreResult<Self> {
        Self::from_values(&values)
    }
}

impl From<ChangingLines> for Vec<u8> {
    fn from(set: ChangingLines) -> Self {
        set.to_vec()
    }
}

impl std::fmt::Display for ChangingLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let values: Vec<String> = self.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", values.join(", "))
    }
}
