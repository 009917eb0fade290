//! Single line draws: the traditional values 6, 7, 8, and 9.
//!
//! Each draw fixes a line before and after the change. Old lines (6 and 9)
//! are changing lines and flip; young lines (7 and 8) stay as they are.

use std::str::FromStr;

use bagua_core::Line;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// The outcome of drawing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineDraw {
    /// 6: yin, changing to yang.
    OldYin,
    /// 7: stable yang.
    YoungYang,
    /// 8: stable yin.
    YoungYin,
    /// 9: yang, changing to yin.
    OldYang,
}

impl LineDraw {
    /// All four outcomes in value order.
    pub const ALL: [Self; 4] = [Self::OldYin, Self::YoungYang, Self::YoungYin, Self::OldYang];

    /// The traditional value (6-9).
    pub const fn value(self) -> u8 {
        match self {
            Self::OldYin => 6,
            Self::YoungYang => 7,
            Self::YoungYin => 8,
            Self::OldYang => 9,
        }
    }

    /// Look up an outcome by its traditional value.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == value)
    }

    /// The line in the base hexagram.
    pub const fn before(self) -> Line {
        match self {
            Self::OldYin | Self::YoungYin => Line::Yin,
            Self::YoungYang | Self::OldYang => Line::Yang,
        }
    }

    /// The line in the result hexagram.
    pub const fn after(self) -> Line {
        if self.is_changing() {
            self.before().flipped()
        } else {
            self.before()
        }
    }

    /// Whether the line belongs to the changing set.
    pub const fn is_changing(self) -> bool {
        matches!(self, Self::OldYin | Self::OldYang)
    }
}

impl std::fmt::Display for LineDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OldYin => "old yin",
            Self::YoungYang => "young yang",
            Self::YoungYin => "young yin",
            Self::OldYang => "old yang",
        };
        write!(f, "{} ({name})", self.value())
    }
}

/// How line values are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDrawMethod {
    /// Each of the four outcomes with probability 1/4.
    #[default]
    Uniform,
    /// Three tossed coins: 6, 7, 8, 9 with probability 1/8, 3/8, 3/8, 1/8.
    ThreeCoins,
}

impl LineDrawMethod {
    /// Draw one line.
    pub fn draw(self, rng: &mut StdRng) -> LineDraw {
        match self {
            Self::Uniform => LineDraw::ALL[rng.random_range(0..LineDraw::ALL.len())],
            Self::ThreeCoins => {
                // Heads count 3, tails 2; the sum is the line value.
                let heads = (0..3).filter(|_| rng.random_bool(0.5)).count();
                match heads {
                    0 => LineDraw::OldYin,
                    1 => LineDraw::YoungYang,
                    2 => LineDraw::YoungYin,
                    _ => LineDraw::OldYang,
                }
            }
        }
    }

    /// Stable name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::ThreeCoins => "coins",
        }
    }
}

impl FromStr for LineDrawMethod {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "uniform" => Ok(Self::Uniform),
            "coins" | "three coins" => Ok(Self::ThreeCoins),
            other => Err(OracleError::InvalidConfig(format!(
                "unknown draw method '{other}' (expected uniform or coins)"
            ))),
        }
    }
}

impl std::fmt::Display for LineDrawMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn values_and_changes() {
        assert_eq!(LineDraw::from_value(6), Some(LineDraw::OldYin));
        assert_eq!(LineDraw::from_value(5), None);
        assert!(LineDraw::OldYang.is_changing());
        assert!(!LineDraw::YoungYin.is_changing());
        assert_eq!(LineDraw::OldYang.before(), Line::Yang);
        assert_eq!(LineDraw::OldYang.after(), Line::Yin);
        assert_eq!(LineDraw::YoungYang.after(), Line::Yang);
        assert_eq!(LineDraw::OldYin.to_string(), "6 (old yin)");
    }

    #[test]
    fn uniform_draws_every_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [0u32; 4];
        for _ in 0..400 {
            let draw = LineDrawMethod::Uniform.draw(&mut rng);
            seen[usize::from(draw.value() - 6)] += 1;
        }
        assert!(seen.iter().all(|&count| count > 50), "{seen:?}");
    }

    #[test]
    fn coins_favor_young_lines() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [0u32; 4];
        for _ in 0..4000 {
            let draw = LineDrawMethod::ThreeCoins.draw(&mut rng);
            seen[usize::from(draw.value() - 6)] += 1;
        }
        // Expected roughly 500 / 1500 / 1500 / 500.
        assert!(seen[1] > 2 * seen[0]);
        assert!(seen[2] > 2 * seen[3]);
        assert!(seen[0] > 300 && seen[3] > 300, "{seen:?}");
    }

    #[test]
    fn parse_method_names() {
        assert_eq!("coins".parse::<LineDrawMethod>().unwrap(), LineDrawMethod::ThreeCoins);
        assert_eq!(
            "Three-Coins".parse::<LineDrawMethod>().unwrap(),
            LineDrawMethod::ThreeCoins
        );
        assert_eq!("uniform".parse::<LineDrawMethod>().unwrap(), LineDrawMethod::Uniform);
        assert!(matches!(
            "yarrow".parse::<LineDrawMethod>(),
            Err(OracleError::InvalidConfig(_))
        ));
    }
}
