//! Where to look next after a cast.

use bagua_core::{HexagramNumber, LinePosition, TopicalLinkTable, TransformationTable};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::caster::Cast;

/// Most topical links offered at once.
pub const MAX_RELATED: usize = 3;

/// A suggested next hexagram to explore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    /// Nothing changed: thematically linked hexagrams, possibly none.
    Related(Vec<HexagramNumber>),
    /// One line changed: where that line leads.
    LineTarget {
        /// The changing line.
        position: LinePosition,
        /// The hexagram it leads to.
        target: HexagramNumber,
    },
    /// Several lines changed: the result itself.
    Result(HexagramNumber),
}

impl Suggestion {
    /// The suggested hexagram numbers.
    pub fn hexagrams(&self) -> Vec<HexagramNumber> {
        match self {
            Self::Related(numbers) => numbers.clone(),
            Self::LineTarget { target, .. } => vec![*target],
            Self::Result(result) => vec![*result],
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Related(numbers) if numbers.is_empty() => write!(f, "no related hexagrams"),
            Self::Related(numbers) => {
                let list: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
                write!(f, "related: {}", list.join(", "))
            }
            Self::LineTarget { position, target } => write!(f, "line {position} leads to {target}"),
            Self::Result(result) => write!(f, "explore the result, {result}"),
        }
    }
}

/// Suggest a next step for a cast.
///
/// With no changing lines, up to [`MAX_RELATED`] topical links of the base in
/// random order; with one, the table target for that line; otherwise the
/// result hexagram.
pub fn suggest<G: Rng + ?Sized>(
    cast: &Cast,
    table: &TransformationTable,
    links: &TopicalLinkTable,
    rng: &mut G,
) -> Suggestion {
    match (cast.changing.len(), cast.changing.highest()) {
        (0, _) | (_, None) => {
            let mut related = links.related(cast.base).to_vec();
            related.shuffle(rng);
            related.truncate(MAX_RELATED);
            Suggestion::Related(related)
        }
        (1, Some(position)) => Suggestion::LineTarget {
            position,
            target: table.get(cast.base, position),
        },
        _ => Suggestion::Result(cast.result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caster::{CastMode, CastQuality};
    use bagua_core::{ChangingLines, HexagramCatalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn n(value: u8) -> HexagramNumber {
        HexagramNumber::new(value).unwrap()
    }

    fn cast(base: u8, result: u8, changing: &[u8]) -> Cast {
        Cast {
            base: n(base),
            result: n(result),
            changing: ChangingLines::from_values(changing).unwrap(),
            mode: CastMode::Chained,
            quality: CastQuality::Clean,
            draws: None,
        }
    }

    fn fixtures() -> (TransformationTable, &'static TopicalLinkTable) {
        let catalog = HexagramCatalog::standard().unwrap();
        (
            TransformationTable::build(catalog).unwrap(),
            TopicalLinkTable::standard().unwrap(),
        )
    }

    #[test]
    fn unchanged_cast_suggests_links() {
        let (table, links) = fixtures();
        let mut rng = StdRng::seed_from_u64(4);
        let suggestion = suggest(&cast(64, 64, &[]), &table, links, &mut rng);
        let Suggestion::Related(mut related) = suggestion else {
            panic!("expected related hexagrams");
        };
        related.sort();
        assert_eq!(related, vec![n(1), n(35), n(63)]);
    }

    #[test]
    fn undefined_links_suggest_nothing() {
        let (table, _) = fixtures();
        let links = TopicalLinkTable::default();
        let mut rng = StdRng::seed_from_u64(4);
        let suggestion = suggest(&cast(5, 5, &[]), &table, &links, &mut rng);
        assert_eq!(suggestion, Suggestion::Related(vec![]));
        assert_eq!(suggestion.to_string(), "no related hexagrams");
    }

    #[test]
    fn single_change_uses_table() {
        let (table, links) = fixtures();
        let mut rng = StdRng::seed_from_u64(4);
        let suggestion = suggest(&cast(1, 44, &[1]), &table, links, &mut rng);
        assert_eq!(
            suggestion,
            Suggestion::LineTarget {
                position: LinePosition::BOTTOM,
                target: n(44)
            }
        );
        assert_eq!(suggestion.hexagrams(), vec![n(44)]);
    }

    #[test]
    fn several_changes_point_at_result() {
        let (table, links) = fixtures();
        let mut rng = StdRng::seed_from_u64(4);
        let suggestion = suggest(&cast(1, 2, &[1, 2, 3, 4, 5, 6]), &table, links, &mut rng);
        assert_eq!(suggestion, Suggestion::Result(n(2)));
    }
}
