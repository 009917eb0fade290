//! Thematic links between hexagrams, used when no line changes.
//!
//! The table is hand-authored data rather than anything derived from line
//! structure. It need not be symmetric or complete; a hexagram without an
//! entry simply has no suggestion.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{CoreError, CoreResult};
use crate::lines::HexagramNumber;

/// Most links a single hexagram may carry.
pub const MAX_LINKS: usize = 3;

/// Built-in links: the upper canon's heaven-and-earth cycle (1-30) and the
/// lower canon's human affairs (31-64).
pub const STANDARD_LINKS: [(u8, &[u8]); 64] = [
    (1, &[2, 44]),
    (2, &[1, 23]),
    (3, &[4, 20]),
    (4, &[3, 22]),
    (5, &[6, 48]),
    (6, &[5, 9, 23]),
    (7, &[8, 13]),
    (8, &[7, 14]),
    (9, &[10, 26]),
    (10, &[9, 58]),
    (11, &[12, 19]),
    (12, &[11, 20]),
    (13, &[14, 49]),
    (14, &[13, 43]),
    (15, &[16, 62]),
    (16, &[15, 51]),
    (17, &[18, 45]),
    (18, &[17, 46]),
    (19, &[20, 41]),
    (20, &[19, 42]),
    (21, &[22, 27]),
    (22, &[21, 36]),
    (23, &[24, 2]),
    (24, &[25, 51]),
    (25, &[26, 17]),
    (26, &[9, 18]),
    (27, &[28, 50]),
    (28, &[27, 62]),
    (29, &[30, 60]),
    (30, &[29, 56]),
    (31, &[32, 39]),
    (32, &[31, 34]),
    (33, &[34, 44]),
    (34, &[33, 55]),
    (35, &[36, 64]),
    (36, &[35, 22]),
    (37, &[38, 40]),
    (38, &[37, 54]),
    (39, &[40, 31]),
    (40, &[39, 16]),
    (41, &[42, 19]),
    (42, &[41, 20]),
    (43, &[44, 14]),
    (44, &[43, 1]),
    (45, &[46, 17]),
    (46, &[45, 18]),
    (47, &[48, 37]),
    (48, &[47, 5]),
    (49, &[50, 13]),
    (50, &[49, 27]),
    (51, &[52, 24]),
    (52, &[51, 15]),
    (53, &[54, 39]),
    (54, &[53, 38]),
    (55, &[56, 34]),
    (56, &[55, 30]),
    (57, &[58, 9]),
    (58, &[57, 10]),
    (59, &[60, 6]),
    (60, &[59, 29]),
    (61, &[62, 33]),
    (62, &[61, 15]),
    (63, &[64, 1]),
    (64, &[63, 35, 1]),
];

static STANDARD: LazyLock<CoreResult<TopicalLinkTable>> = LazyLock::new(|| {
    TopicalLinkTable::from_entries(STANDARD_LINKS.iter().map(|&(from, to)| (from, to)))
});

/// Validated hexagram-to-hexagram thematic links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicalLinkTable {
    links: BTreeMap<HexagramNumber, Vec<HexagramNumber>>,
}

impl TopicalLinkTable {
    /// Build a table from raw `(from, [to, ...])` rows.
    ///
    /// Each row needs 1 to [`MAX_LINKS`] distinct targets, none equal to
    /// its source, and each source may appear once.
    pub fn from_entries<'a, I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (u8, &'a [u8])>,
    {
        let mut links = BTreeMap::new();
        for (from, targets) in entries {
            let source = HexagramNumber::new(from)?;
            let invalid = |reason: &str| CoreError::InvalidLink {
                from,
                reason: reason.to_string(),
            };

            if targets.is_empty() || targets.len() > MAX_LINKS {
                return Err(invalid(&format!(
                    "expected 1-{MAX_LINKS} links, found {}",
                    targets.len()
                )));
            }

            let mut row: Vec<HexagramNumber> = Vec::with_capacity(targets.len());
            for &to in targets {
                let target = HexagramNumber::new(to)?;
                if target == source {
                    return Err(invalid("links to itself"));
                }
                if row.contains(&target) {
                    return Err(invalid(&format!("repeats {target}")));
                }
                row.push(target);
            }

            if links.insert(source, row).is_some() {
                return Err(invalid("listed more than once"));
            }
        }
        Ok(Self { links })
    }

    /// Parse a JSON object mapping hexagram numbers to link lists,
    /// e.g. `{"1": [2, 44]}`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: BTreeMap<u8, Vec<u8>> =
            serde_json::from_str(json).map_err(|e| CoreError::MalformedLinks(e.to_string()))?;
        Self::from_entries(raw.iter().map(|(&from, to)| (from, to.as_slice())))
    }

    /// The built-in table.
    pub fn standard() -> CoreResult<&'static Self> {
        STANDARD.as_ref().map_err(Clone::clone)
    }

    /// Linked hexagrams in authored order; empty when undefined.
    pub fn related(&self, number: HexagramNumber) -> &[HexagramNumber] {
        self.links.get(&number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of hexagrams with links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the table defines no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All rows in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (HexagramNumber, &[HexagramNumber])> {
        self.links.iter().map(|(&from, to)| (from, to.as_slice()))
    }
}
