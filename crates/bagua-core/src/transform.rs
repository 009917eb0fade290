//! Line transformation: flip changing lines and resolve the result.

use crate::catalog::PatternResolver;
use crate::error::{CoreError, CoreResult};
use crate::lines::{ChangingLines, HexagramNumber, LinePosition, Lines};

fn lines_of<R: PatternResolver + ?Sized>(
    resolver: &R,
    number: HexagramNumber,
) -> CoreResult<Lines> {
    resolver
        .lines_of(number)
        .ok_or(CoreError::MissingNumber(number.get()))
}

fn resolve<R: PatternResolver + ?Sized>(resolver: &R, lines: Lines) -> CoreResult<HexagramNumber> {
    resolver
        .resolve(lines)
        .ok_or(CoreError::UnresolvedPattern(lines))
}

/// Flip every changing line of `base` and return the resulting hexagram.
///
/// An empty set returns `base` unchanged. `UnresolvedPattern` means the
/// resolver is not a bijection and must be treated as a defect.
pub fn apply<R: PatternResolver + ?Sized>(
    resolver: &R,
    base: HexagramNumber,
    changes: ChangingLines,
) -> CoreResult<HexagramNumber> {
    if changes.is_empty() {
        return Ok(base);
    }
    let lines = lines_of(resolver, base)?;
    resolve(resolver, lines.apply(changes))
}

/// Flip lines one at a time, in the given order.
///
/// A position listed twice flips back.
pub fn apply_in_order<R, I>(
    resolver: &R,
    base: HexagramNumber,
    positions: I,
) -> CoreResult<HexagramNumber>
where
    R: PatternResolver + ?Sized,
    I: IntoIterator<Item = LinePosition>,
{
    let lines = positions
        .into_iter()
        .fold(lines_of(resolver, base)?, Lines::flip);
    resolve(resolver, lines)
}

/// The changing lines that turn `from` into `to`.
pub fn changes_between<R: PatternResolver + ?Sized>(
    resolver: &R,
    from: HexagramNumber,
    to: HexagramNumber,
) -> CoreResult<ChangingLines> {
    let a = lines_of(resolver, from)?;
    let b = lines_of(resolver, to)?;
    Ok(LinePosition::all()
        .filter(|&p| a.line(p) != b.line(p))
        .collect())
}
