//! The eight trigrams and their mathematical readings.
//!
//! Each trigram is a three-line figure; stacking two gives a hexagram. The
//! two [`MathModel`]s map every trigram onto a mathematical idea: one onto
//! abstract foundations, the other onto concrete objects of study.

use serde::{Deserialize, Serialize};

use crate::lines::Lines;

/// One of the eight trigrams, listed in the Fu Xi order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigram {
    /// ☰ Heaven.
    Qian,
    /// ☱ Lake.
    Dui,
    /// ☲ Fire.
    Li,
    /// ☳ Thunder.
    Zhen,
    /// ☴ Wind.
    Xun,
    /// ☵ Water.
    Kan,
    /// ☶ Mountain.
    Gen,
    /// ☷ Earth.
    Kun,
}

/// Which mathematical reading to apply to the trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathModel {
    /// Abstract foundations: number, set, function, relation, ...
    Abstract,
    /// Concrete objects: π, binary, the golden ratio, probability, ...
    Concrete,
}

impl MathModel {
    /// Parse a model name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "abstract" | "a" => Some(Self::Abstract),
            "concrete" | "c" => Some(Self::Concrete),
            _ => None,
        }
    }

    /// The four complementary trigram pairs under this model.
    pub fn duality_pairs(self) -> [(Trigram, Trigram); 4] {
        use Trigram::*;
        match self {
            Self::Abstract => [(Qian, Kun), (Zhen, Xun), (Kan, Li), (Gen, Dui)],
            Self::Concrete => [(Qian, Kun), (Li, Kan), (Zhen, Xun), (Gen, Dui)],
        }
    }
}

impl std::fmt::Display for MathModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abstract => write!(f, "abstract"),
            Self::Concrete => write!(f, "concrete"),
        }
    }
}

/// A mathematical idea attached to a trigram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Concept {
    /// Short name of the idea.
    pub name: &'static str,
    /// The theme that links it to the trigram.
    pub theme: &'static str,
}

impl Trigram {
    /// All eight trigrams in Fu Xi order.
    pub const ALL: [Self; 8] = [
        Self::Qian,
        Self::Dui,
        Self::Li,
        Self::Zhen,
        Self::Xun,
        Self::Kan,
        Self::Gen,
        Self::Kun,
    ];

    /// Three-line mask with the bottom line in bit 0.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Qian => 0b111,
            Self::Dui => 0b011,
            Self::Li => 0b101,
            Self::Zhen => 0b001,
            Self::Xun => 0b110,
            Self::Kan => 0b010,
            Self::Gen => 0b100,
            Self::Kun => 0b000,
        }
    }

    /// Look up a trigram by its three-line mask.
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.bits() == bits)
    }

    /// Parse a trigram from its name, image, symbol, or 1-8 Fu Xi index.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL.into_iter().find(|t| {
            t.to_string().eq_ignore_ascii_case(s)
                || t.image().eq_ignore_ascii_case(s)
                || s.chars().eq([t.symbol()])
        })
    }

    /// Unicode trigram symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Qian => '☰',
            Self::Dui => '☱',
            Self::Li => '☲',
            Self::Zhen => '☳',
            Self::Xun => '☴',
            Self::Kan => '☵',
            Self::Gen => '☶',
            Self::Kun => '☷',
        }
    }

    /// The natural image the trigram stands for.
    pub const fn image(self) -> &'static str {
        match self {
            Self::Qian => "heaven",
            Self::Dui => "lake",
            Self::Li => "fire",
            Self::Zhen => "thunder",
            Self::Xun => "wind",
            Self::Kan => "water",
            Self::Gen => "mountain",
            Self::Kun => "earth",
        }
    }

    /// The trigram's mathematical reading under a model.
    pub const fn concept(self, model: MathModel) -> Concept {
        let (name, theme) = match (model, self) {
            (MathModel::Abstract, Self::Qian) => ("natural numbers", "counting"),
            (MathModel::Abstract, Self::Kun) => ("sets", "membership"),
            (MathModel::Abstract, Self::Zhen) => ("functions", "transformation"),
            (MathModel::Abstract, Self::Xun) => ("relations", "ordering"),
            (MathModel::Abstract, Self::Kan) => ("measure", "size and uncertainty"),
            (MathModel::Abstract, Self::Li) => ("structure", "invariance and pattern"),
            (MathModel::Abstract, Self::Gen) => ("limits", "convergence"),
            (MathModel::Abstract, Self::Dui) => ("operations", "composition"),
            (MathModel::Concrete, Self::Qian) => ("pi", "circularity"),
            (MathModel::Concrete, Self::Kun) => ("binary", "discreteness"),
            (MathModel::Concrete, Self::Li) => ("golden ratio", "proportion"),
            (MathModel::Concrete, Self::Kan) => ("probability", "uncertainty"),
            (MathModel::Concrete, Self::Zhen) => ("derivative", "rate of change"),
            (MathModel::Concrete, Self::Xun) => ("integral", "accumulation"),
            (MathModel::Concrete, Self::Gen) => ("primes", "primality"),
            (MathModel::Concrete, Self::Dui) => ("symmetry", "invariance"),
        };
        Concept { name, theme }
    }

    /// The trigram with every line flipped.
    pub fn complement(self) -> Self {
        match self {
            Self::Qian => Self::Kun,
            Self::Dui => Self::Gen,
            Self::Li => Self::Kan,
            Self::Zhen => Self::Xun,
            Self::Xun => Self::Zhen,
            Self::Kan => Self::Li,
            Self::Gen => Self::Dui,
            Self::Kun => Self::Qian,
        }
    }

    /// Split a hexagram pattern into its (upper, lower) trigrams.
    pub fn split(lines: Lines) -> (Self, Self) {
        (
            Self::from_bits_total(lines.upper_bits()),
            Self::from_bits_total(lines.lower_bits()),
        )
    }

    /// Stack two trigrams into a hexagram pattern.
    pub const fn stack(upper: Self, lower: Self) -> Lines {
        Lines::from_trigram_bits(upper.bits(), lower.bits())
    }

    // Every 3-bit mask names a trigram.
    fn from_bits_total(bits: u8) -> Self {
        match bits & 0b111 {
            0b111 => Self::Qian,
            0b011 => Self::Dui,
            0b101 => Self::Li,
            0b001 => Self::Zhen,
            0b110 => Self::Xun,
            0b010 => Self::Kan,
            0b100 => Self::Gen,
            _ => Self::Kun,
        }
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qian => write!(f, "Qian"),
            Self::Dui => write!(f, "Dui"),
            Self::Li => write!(f, "Li"),
            Self::Zhen => write!(f, "Zhen"),
            Self::Xun => write!(f, "Xun"),
            Self::Kan => write!(f, "Kan"),
            Self::Gen => write!(f, "Gen"),
            Self::Kun => write!(f, "Kun"),
        }
    }
}
