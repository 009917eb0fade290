//! The authoritative catalog of the 64 hexagrams.
//!
//! Numbering follows the traditional King Wen sequence. The catalog is
//! built once, checked for a one-to-one mapping between numbers and line
//! patterns, and never mutated afterwards.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::lines::{HexagramNumber, Line, LinePosition, Lines};
use crate::trigram::Trigram;

/// Raw catalog row, as written in source.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Hexagram number (expected 1..=64).
    pub number: u8,
    /// Romanized name.
    pub name: &'static str,
    /// English title.
    pub title: &'static str,
    /// Lines from the top down, 1 = yang.
    pub lines: [u8; 6],
}

const fn entry(
    number: u8,
    name: &'static str,
    title: &'static str,
    lines: [u8; 6],
) -> CatalogEntry {
    CatalogEntry {
        number,
        name,
        title,
        lines,
    }
}

/// The King Wen sequence, lines listed top to bottom.
pub const KING_WEN: [CatalogEntry; 64] = [
    entry(1, "Qian", "The Creative", [1, 1, 1, 1, 1, 1]),
    entry(2, "Kun", "The Receptive", [0, 0, 0, 0, 0, 0]),
    entry(3, "Zhun", "Difficulty at the Beginning", [0, 1, 0, 0, 0, 1]),
    entry(4, "Meng", "Youthful Folly", [1, 0, 0, 0, 1, 0]),
    entry(5, "Xu", "Waiting", [0, 1, 0, 1, 1, 1]),
    entry(6, "Song", "Conflict", [1, 1, 1, 0, 1, 0]),
    entry(7, "Shi", "The Army", [0, 0, 0, 0, 1, 0]),
    entry(8, "Bi", "Holding Together", [0, 1, 0, 0, 0, 0]),
    entry(9, "Xiao Chu", "The Taming Power of the Small", [1, 1, 0, 1, 1, 1]),
    entry(10, "Lü", "Treading", [1, 1, 1, 0, 1, 1]),
    entry(11, "Tai", "Peace", [0, 0, 0, 1, 1, 1]),
    entry(12, "Pi", "Standstill", [1, 1, 1, 0, 0, 0]),
    entry(13, "Tong Ren", "Fellowship with Men", [1, 1, 1, 1, 0, 1]),
    entry(14, "Da You", "Possession in Great Measure", [1, 0, 1, 1, 1, 1]),
    entry(15, "Qian", "Modesty", [0, 0, 0, 1, 0, 0]),
    entry(16, "Yu", "Enthusiasm", [0, 0, 1, 0, 0, 0]),
    entry(17, "Sui", "Following", [0, 1, 1, 0, 0, 1]),
    entry(18, "Gu", "Work on What Has Been Spoiled", [1, 0, 0, 1, 1, 0]),
    entry(19, "Lin", "Approach", [0, 0, 0, 0, 1, 1]),
    entry(20, "Guan", "Contemplation", [1, 1, 0, 0, 0, 0]),
    entry(21, "Shi He", "Biting Through", [1, 0, 1, 0, 0, 1]),
    entry(22, "Bi", "Grace", [1, 0, 0, 1, 0, 1]),
    entry(23, "Bo", "Splitting Apart", [1, 0, 0, 0, 0, 0]),
    entry(24, "Fu", "Return", [0, 0, 0, 0, 0, 1]),
    entry(25, "Wu Wang", "Innocence", [1, 1, 1, 0, 0, 1]),
    entry(26, "Da Chu", "The Taming Power of the Great", [1, 0, 0, 1, 1, 1]),
    entry(27, "Yi", "The Corners of the Mouth", [1, 0, 0, 0, 0, 1]),
    entry(28, "Da Guo", "Preponderance of the Great", [0, 1, 1, 1, 1, 0]),
    entry(29, "Kan", "The Abysmal", [0, 1, 0, 0, 1, 0]),
    entry(30, "Li", "The Clinging", [1, 0, 1, 1, 0, 1]),
    entry(31, "Xian", "Influence", [0, 1, 1, 1, 0, 0]),
    entry(32, "Heng", "Duration", [0, 0, 1, 1, 1, 0]),
    entry(33, "Dun", "Retreat", [1, 1, 1, 1, 0, 0]),
    entry(34, "Da Zhuang", "The Power of the Great", [0, 0, 1, 1, 1, 1]),
    entry(35, "Jin", "Progress", [1, 0, 1, 0, 0, 0]),
    entry(36, "Ming Yi", "Darkening of the Light", [0, 0, 0, 1, 0, 1]),
    entry(37, "Jia Ren", "The Family", [1, 1, 0, 1, 0, 1]),
    entry(38, "Kui", "Opposition", [1, 0, 1, 0, 1, 1]),
    entry(39, "Jian", "Obstruction", [0, 1, 0, 1, 0, 0]),
    entry(40, "Xie", "Deliverance", [0, 0, 1, 0, 1, 0]),
    entry(41, "Sun", "Decrease", [1, 0, 0, 0, 1, 1]),
    entry(42, "Yi", "Increase", [1, 1, 0, 0, 0, 1]),
    entry(43, "Guai", "Breakthrough", [0, 1, 1, 1, 1, 1]),
    entry(44, "Gou", "Coming to Meet", [1, 1, 1, 1, 1, 0]),
    entry(45, "Cui", "Gathering Together", [0, 1, 1, 0, 0, 0]),
    entry(46, "Sheng", "Pushing Upward", [0, 0, 0, 1, 1, 0]),
    entry(47, "Kun", "Oppression", [0, 1, 1, 0, 1, 0]),
    entry(48, "Jing", "The Well", [0, 1, 0, 1, 1, 0]),
    entry(49, "Ge", "Revolution", [0, 1, 1, 1, 0, 1]),
    entry(50, "Ding", "The Cauldron", [1, 0, 1, 1, 1, 0]),
    entry(51, "Zhen", "The Arousing", [0, 0, 1, 0, 0, 1]),
    entry(52, "Gen", "Keeping Still", [1, 0, 0, 1, 0, 0]),
    entry(53, "Jian", "Development", [1, 1, 0, 1, 0, 0]),
    entry(54, "Gui Mei", "The Marrying Maiden", [0, 0, 1, 0, 1, 1]),
    entry(55, "Feng", "Abundance", [0, 0, 1, 1, 0, 1]),
    entry(56, "Lü", "The Wanderer", [1, 0, 1, 1, 0, 0]),
    entry(57, "Xun", "The Gentle", [1, 1, 0, 1, 1, 0]),
    entry(58, "Dui", "The Joyous", [0, 1, 1, 0, 1, 1]),
    entry(59, "Huan", "Dispersion", [1, 1, 0, 0, 1, 0]),
    entry(60, "Jie", "Limitation", [0, 1, 0, 0, 1, 1]),
    entry(61, "Zhong Fu", "Inner Truth", [1, 1, 0, 0, 1, 1]),
    entry(62, "Xiao Guo", "Preponderance of the Small", [0, 0, 1, 1, 0, 0]),
    entry(63, "Ji Ji", "After Completion", [0, 1, 0, 1, 0, 1]),
    entry(64, "Wei Ji", "Before Completion", [1, 0, 1, 0, 1, 0]),
];

/// A validated hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    /// Catalog number.
    pub number: HexagramNumber,
    /// Romanized name.
    pub name: &'static str,
    /// English title.
    pub title: &'static str,
    /// The six lines.
    pub lines: Lines,
}

impl Hexagram {
    /// The Unicode hexagram glyph (U+4DC0 block, King Wen order).
    pub fn symbol(&self) -> char {
        char::from_u32(0x4DC0 + u32::from(self.number.get() - 1)).unwrap_or('?')
    }

    /// The (upper, lower) trigrams.
    pub fn trigrams(&self) -> (Trigram, Trigram) {
        Trigram::split(self.lines)
    }

    /// Display label such as `"11 Tai (Peace)"`.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.number, self.name, self.title)
    }
}

/// Resolves line patterns to hexagram numbers and back.
///
/// [`HexagramCatalog`] is the production implementation; the casting layer
/// is written against this trait so integrity failures can be exercised.
pub trait PatternResolver {
    /// The hexagram with this pattern, if any.
    fn resolve(&self, lines: Lines) -> Option<HexagramNumber>;

    /// The pattern of a hexagram, if known.
    fn lines_of(&self, number: HexagramNumber) -> Option<Lines>;
}

impl<T: PatternResolver + ?Sized> PatternResolver for &T {
    fn resolve(&self, lines: Lines) -> Option<HexagramNumber> {
        (**self).resolve(lines)
    }

    fn lines_of(&self, number: HexagramNumber) -> Option<Lines> {
        (**self).lines_of(number)
    }
}

/// The validated, immutable set of 64 hexagrams.
#[derive(Debug, Clone)]
pub struct HexagramCatalog {
    hexagrams: Vec<Hexagram>,
    by_lines: [Option<HexagramNumber>; Lines::COUNT],
}

static STANDARD: LazyLock<CoreResult<HexagramCatalog>> =
    LazyLock::new(|| HexagramCatalog::from_entries(&KING_WEN));

impl HexagramCatalog {
    /// Build a catalog, failing unless numbers and patterns form a bijection.
    pub fn from_entries(entries: &[CatalogEntry]) -> CoreResult<Self> {
        let mut slots: Vec<Option<Hexagram>> = vec![None; usize::from(HexagramNumber::MAX)];
        let mut by_lines = [None; Lines::COUNT];

        for raw in entries {
            let number = HexagramNumber::new(raw.number)?;
            let lines = Lines::from_top_down(raw.lines)?;

            let slot = &mut slots[number.index()];
            if slot.is_some() {
                return Err(CoreError::MissingNumber(raw.number));
            }
            let owner = &mut by_lines[usize::from(lines.bits())];
            if let Some(first) = *owner {
                return Err(CoreError::DuplicatePattern {
                    first,
                    second: number,
                    lines,
                });
            }

            *owner = Some(number);
            *slot = Some(Hexagram {
                number,
                name: raw.name,
                title: raw.title,
                lines,
            });
        }

        let mut hexagrams = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(hexagram) => hexagrams.push(hexagram),
                None => return Err(CoreError::MissingNumber(index as u8 + 1)),
            }
        }

        Ok(Self {
            hexagrams,
            by_lines,
        })
    }

    /// The built-in King Wen catalog, validated on first use.
    pub fn standard() -> CoreResult<&'static Self> {
        STANDARD.as_ref().map_err(Clone::clone)
    }

    /// The hexagram with a validated number.
    pub fn get(&self, number: HexagramNumber) -> &Hexagram {
        &self.hexagrams[number.index()]
    }

    /// Look up by raw number; `None` outside 1..=64.
    pub fn lookup_by_number(&self, number: u8) -> Option<&Hexagram> {
        HexagramNumber::new(number).ok().map(|n| self.get(n))
    }

    /// Look up a top-down 0/1 pattern; `None` if it is not a valid pattern.
    pub fn lookup_by_lines(&self, pattern: [u8; 6]) -> Option<HexagramNumber> {
        Lines::from_top_down(pattern)
            .ok()
            .and_then(|lines| self.resolve(lines))
    }

    /// The hexagram's line at one position.
    pub fn line(&self, number: HexagramNumber, pos: LinePosition) -> Line {
        self.get(number).lines.line(pos)
    }

    /// Find a hexagram by romanized name or English title (case-insensitive).
    ///
    /// Names repeat across the sequence; the lowest number wins.
    pub fn find_by_name(&self, query: &str) -> Option<&Hexagram> {
        let query = query.trim().to_lowercase();
        self.hexagrams
            .iter()
            .find(|h| h.name.to_lowercase() == query || h.title.to_lowercase() == query)
    }

    /// All hexagrams in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = &Hexagram> {
        self.hexagrams.iter()
    }
}

impl PatternResolver for HexagramCatalog {
    fn resolve(&self, lines: Lines) -> Option<HexagramNumber> {
        self.by_lines[usize::from(lines.bits())]
    }

    fn lines_of(&self, number: HexagramNumber) -> Option<Lines> {
        Some(self.get(number).lines)
    }
}
