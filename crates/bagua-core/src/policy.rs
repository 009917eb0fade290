//! Interpretation rules keyed on how many lines change.
//!
//! | changing | guideline |
//! |---|---|
//! | 0 | base hexagram only |
//! | 1 | the single changing line is authoritative |
//! | 2 | the higher of the two changing lines |
//! | 3 | base and result read together |
//! | 4-6 | result hexagram, base de-emphasized |

use serde::{Deserialize, Serialize};

use crate::lines::{ChangingLines, HexagramNumber, LinePosition};

/// Which part of a cast carries the meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guideline {
    /// Read the base hexagram's overall meaning.
    BaseOnly,
    /// Read the single changing line.
    SingleLine,
    /// Read the higher of two changing lines.
    UpperLine,
    /// Read base and result hexagrams together.
    BaseAndResult,
    /// Read the result hexagram.
    ResultCentric,
}

/// The guideline for a number of changing lines.
pub fn guideline(changing_count: usize) -> Guideline {
    Guideline::for_count(changing_count)
}

impl Guideline {
    /// Map a changing-line count to its guideline. Counts above 6 are
    /// treated like 6.
    pub fn for_count(changing_count: usize) -> Self {
        match changing_count {
            0 => Self::BaseOnly,
            1 => Self::SingleLine,
            2 => Self::UpperLine,
            3 => Self::BaseAndResult,
            _ => Self::ResultCentric,
        }
    }

    /// Stable machine-readable tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::BaseOnly => "base_only",
            Self::SingleLine => "single_line",
            Self::UpperLine => "upper_line",
            Self::BaseAndResult => "base_and_result",
            Self::ResultCentric => "result_centric",
        }
    }

    /// One-sentence reading rule.
    pub fn description(self) -> &'static str {
        match self {
            Self::BaseOnly => "No lines change: read the base hexagram's overall judgment.",
            Self::SingleLine => {
                "One line changes: its line text is the authoritative message."
            }
            Self::UpperLine => {
                "Two lines change: the higher changing line carries the weight."
            }
            Self::BaseAndResult => {
                "Three lines change: read the base (present) and result (future) together."
            }
            Self::ResultCentric => {
                "Four or more lines change: focus on the result hexagram, the base recedes."
            }
        }
    }

    /// Resolve the guideline to the concrete element to read.
    pub fn focus(
        self,
        base: HexagramNumber,
        result: HexagramNumber,
        changes: ChangingLines,
    ) -> Focus {
        match (self, changes.highest()) {
            (Self::SingleLine | Self::UpperLine, Some(position)) => Focus::Line {
                hexagram: base,
                position,
            },
            (Self::BaseAndResult, _) => Focus::Pair { base, result },
            (Self::ResultCentric, _) => Focus::Hexagram(result),
            _ => Focus::Hexagram(base),
        }
    }
}

impl std::fmt::Display for Guideline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The element a reading should concentrate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    /// One hexagram's overall meaning.
    Hexagram(HexagramNumber),
    /// One line of a hexagram.
    Line {
        /// The hexagram holding the line.
        hexagram: HexagramNumber,
        /// The line.
        position: LinePosition,
    },
    /// Two hexagrams read together.
    Pair {
        /// The present situation.
        base: HexagramNumber,
        /// Where it is heading.
        result: HexagramNumber,
    },
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hexagram(n) => write!(f, "hexagram {n}"),
            Self::Line { hexagram, position } => {
                write!(f, "line {position} of hexagram {hexagram}")
            }
            Self::Pair { base, result } => write!(f, "hexagrams {base} and {result} together"),
        }
    }
}
