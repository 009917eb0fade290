//! The complete single-line transformation table (64 × 6 = 384 entries).

use std::collections::BTreeMap;

use crate::catalog::PatternResolver;
use crate::error::{CoreError, CoreResult};
use crate::lines::{HexagramNumber, LinePosition};
use crate::transform;

/// Result of changing each single line of each hexagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationTable {
    // Row per hexagram, column per line position (bottom first).
    targets: Vec<[HexagramNumber; 6]>,
}

impl TransformationTable {
    /// Number of entries in a complete table.
    pub const ENTRIES: usize = 64 * 6;

    /// Build the table by transforming every hexagram at every position.
    pub fn build<R: PatternResolver + ?Sized>(resolver: &R) -> CoreResult<Self> {
        let targets = HexagramNumber::all()
            .map(|number| {
                let mut row = [number; 6];
                for pos in LinePosition::all() {
                    row[column(pos)] =
                        transform::apply(resolver, number, [pos].into_iter().collect())?;
                }
                Ok(row)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        tracing::debug!(entries = Self::ENTRIES, "built transformation table");
        Ok(Self { targets })
    }

    /// The hexagram reached by changing one line.
    pub fn get(&self, number: HexagramNumber, pos: LinePosition) -> HexagramNumber {
        self.targets[number.index()][column(pos)]
    }

    /// The six single-line neighbours of a hexagram, bottom line first.
    pub fn neighbors(&self, number: HexagramNumber) -> [HexagramNumber; 6] {
        self.targets[number.index()]
    }

    /// Every `(source, position, target)` triple in numeric order.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = (HexagramNumber, LinePosition, HexagramNumber)> + '_ {
        HexagramNumber::all()
            .flat_map(|number| LinePosition::all().map(move |pos| (number, pos)))
            .map(|(number, pos)| (number, pos, self.get(number, pos)))
    }

    /// The table as a flat `(source, position) -> target` map.
    pub fn to_map(&self) -> BTreeMap<(HexagramNumber, LinePosition), HexagramNumber> {
        self.entries()
            .map(|(number, pos, target)| ((number, pos), target))
            .collect()
    }

    /// The table as nested raw numbers, suitable for JSON output.
    pub fn to_nested(&self) -> BTreeMap<u8, BTreeMap<u8, u8>> {
        let mut nested: BTreeMap<u8, BTreeMap<u8, u8>> = BTreeMap::new();
        for (number, pos, target) in self.entries() {
            nested
                .entry(number.get())
                .or_default()
                .insert(pos.get(), target.get());
        }
        nested
    }

    /// Check that every entry moves away from its source and flips back.
    pub fn self_check(&self) -> CoreResult<()> {
        for (number, pos, target) in self.entries() {
            if target == number || self.get(target, pos) != number {
                return Err(CoreError::InconsistentTable {
                    number: number.get(),
                    position: pos.get(),
                });
            }
        }
        Ok(())
    }
}

fn column(pos: LinePosition) -> usize {
    usize::from(pos.get() - 1)
}
