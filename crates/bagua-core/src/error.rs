use crate::lines::{HexagramNumber, Lines};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the hexagram model.
///
/// Catalog integrity variants are fatal at startup. `UnresolvedPattern`
/// can only occur with a broken resolver and signals a bug, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Two catalog entries share the same line pattern.
    #[error("hexagrams {first} and {second} share line pattern {lines}")]
    DuplicatePattern {
        /// The entry that claimed the pattern first.
        first: HexagramNumber,
        /// The entry that repeated it.
        second: HexagramNumber,
        /// The repeated pattern.
        lines: Lines,
    },

    /// A hexagram number has no catalog entry, or appears more than once.
    #[error("catalog entry for hexagram {0} is missing or repeated")]
    MissingNumber(u8),

    /// A hexagram number outside 1..=64.
    #[error("invalid hexagram number: {0} (expected 1-64)")]
    InvalidNumber(u8),

    /// A line position outside 1..=6.
    #[error("invalid line position: {0} (expected 1-6)")]
    InvalidLinePosition(u8),

    /// A line value other than 0 (yin) or 1 (yang).
    #[error("invalid line value: {0} (expected 0 or 1)")]
    InvalidLineValue(u8),

    /// A line pattern that the catalog cannot resolve to a hexagram.
    #[error("line pattern {0} does not resolve to any cataloged hexagram")]
    UnresolvedPattern(Lines),

    /// A transformation table entry that does not flip back to its source.
    #[error("transformation table is inconsistent at hexagram {number}, line {position}")]
    InconsistentTable {
        /// Source hexagram.
        number: u8,
        /// Changing line position.
        position: u8,
    },

    /// A malformed topical link entry.
    #[error("invalid topical link for hexagram {from}: {reason}")]
    InvalidLink {
        /// The hexagram the entry belongs to.
        from: u8,
        /// What is wrong with it.
        reason: String,
    },

    /// Topical link data could not be parsed.
    #[error("malformed link data: {0}")]
    MalformedLinks(String),
}
