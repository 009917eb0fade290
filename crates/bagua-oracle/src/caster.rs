//! The divination caster.
//!
//! A session is either FRESH (no previous result) or CHAINED. A fresh cast
//! draws six lines; a chained cast starts from the previous result and
//! changes one to three of its lines. Every cast, including the degraded
//! ones, moves the session to CHAINED.
//!
//! Casting never fails. Under a correct catalog neither fallback below can
//! trigger; when one does, it is logged at error level and flagged on the
//! returned [`Cast`].

use bagua_core::transform;
use bagua_core::{
    ChangingLines, CoreError, CoreResult, Guideline, HexagramCatalog, HexagramNumber,
    LinePosition, Lines, PatternResolver, TransformationTable,
};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::config::CasterConfig;
use crate::draw::LineDraw;
use crate::session::DivinationSession;

/// Which state the session was in when the cast was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastMode {
    /// Six fresh line draws.
    Fresh,
    /// Continued from the previous result.
    Chained,
    /// Base and changing lines picked by hand.
    Chosen,
}

impl std::fmt::Display for CastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Chained => write!(f, "chained"),
            Self::Chosen => write!(f, "chosen"),
        }
    }
}

/// Whether a cast came out of the normal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastQuality {
    /// Resolved normally.
    Clean,
    /// Fresh attempts were exhausted; the fixed default was returned.
    Fallback,
    /// A chained result did not resolve; a random hexagram stands in.
    Degraded,
}

impl CastQuality {
    /// Operator-facing note for non-clean casts.
    pub fn description(self) -> &'static str {
        match self {
            Self::Clean => "resolved normally",
            Self::Fallback => "fallback: fresh draws did not resolve, default 1 -> 2 returned",
            Self::Degraded => {
                "degraded: chained result did not resolve, random hexagram substituted"
            }
        }
    }
}

impl std::fmt::Display for CastQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Fallback => write!(f, "fallback"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// The outcome of one cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    /// The hexagram describing the present situation.
    pub base: HexagramNumber,
    /// The hexagram after the changing lines flip.
    pub result: HexagramNumber,
    /// Positions that changed.
    pub changing: ChangingLines,
    /// FRESH or CHAINED.
    pub mode: CastMode,
    /// Whether a fallback was used.
    pub quality: CastQuality,
    /// The six line draws, bottom first; fresh casts only.
    pub draws: Option<[LineDraw; 6]>,
}

impl Cast {
    /// A cast composed by hand: `changing` flipped on `base`.
    ///
    /// Unlike a drawn cast this does not fall back; a resolver error is
    /// returned as is.
    pub fn chosen<R: PatternResolver + ?Sized>(
        resolver: &R,
        base: HexagramNumber,
        changing: ChangingLines,
    ) -> CoreResult<Self> {
        Ok(Self {
            base,
            result: transform::apply(resolver, base, changing)?,
            changing,
            mode: CastMode::Chosen,
            quality: CastQuality::Clean,
            draws: None,
        })
    }

    /// `(base, result, changing)`.
    pub fn triple(&self) -> (HexagramNumber, HexagramNumber, ChangingLines) {
        (self.base, self.result, self.changing)
    }

    /// The interpretation guideline for this cast.
    pub fn guideline(&self) -> Guideline {
        Guideline::for_count(self.changing.len())
    }
}

/// Assemble base, result, and changing lines from six draws, bottom first.
///
/// Fails only if the resolver cannot resolve one of the two patterns.
pub fn assemble_fresh<R: PatternResolver + ?Sized>(
    draws: &[LineDraw; 6],
    resolver: &R,
) -> CoreResult<(HexagramNumber, HexagramNumber, ChangingLines)> {
    let before = Lines::from_bottom_up(draws.map(LineDraw::before));
    let after = Lines::from_bottom_up(draws.map(LineDraw::after));
    let changing: ChangingLines = LinePosition::all()
        .zip(draws)
        .filter(|(_, draw)| draw.is_changing())
        .map(|(pos, _)| pos)
        .collect();

    let base = resolver
        .resolve(before)
        .ok_or(CoreError::UnresolvedPattern(before))?;
    let result = resolver
        .resolve(after)
        .ok_or(CoreError::UnresolvedPattern(after))?;
    Ok((base, result, changing))
}

/// Casts hexagrams against a resolver.
#[derive(Debug, Clone)]
pub struct DivinationCaster<R> {
    resolver: R,
    table: Option<TransformationTable>,
    config: CasterConfig,
}

impl DivinationCaster<&'static HexagramCatalog> {
    /// A caster over the built-in catalog with a prebuilt table.
    pub fn standard(config: CasterConfig) -> CoreResult<Self> {
        let catalog = HexagramCatalog::standard()?;
        let table = TransformationTable::build(catalog)?;
        Ok(Self::new(catalog, config).with_table(table))
    }
}

impl<R: PatternResolver> DivinationCaster<R> {
    /// Create a caster without a lookup table.
    pub fn new(resolver: R, config: CasterConfig) -> Self {
        Self {
            resolver,
            table: None,
            config,
        }
    }

    /// Serve single-line chained changes from a prebuilt table.
    pub fn with_table(mut self, table: TransformationTable) -> Self {
        self.table = Some(table);
        self
    }

    /// The resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The lookup table, if one was supplied.
    pub fn table(&self) -> Option<&TransformationTable> {
        self.table.as_ref()
    }

    /// The configuration.
    pub fn config(&self) -> &CasterConfig {
        &self.config
    }

    /// Cast once and advance the session.
    pub fn cast(&self, session: &mut DivinationSession) -> Cast {
        let cast = match session.previous_result() {
            None => self.cast_fresh(session.rng()),
            Some(base) => self.cast_chained(base, session.rng()),
        };
        session.record(&cast);

        tracing::info!(
            session = %session.id(),
            mode = %cast.mode,
            base = cast.base.get(),
            result = cast.result.get(),
            changing = %cast.changing,
            "cast"
        );
        cast
    }

    /// Return the session to the fresh state.
    pub fn reset(&self, session: &mut DivinationSession) {
        session.reset();
        tracing::info!(session = %session.id(), "session reset");
    }

    fn cast_fresh(&self, rng: &mut StdRng) -> Cast {
        let method = self.config.draw_method;
        let attempts = self.config.max_fresh_attempts.max(1);

        for attempt in 1..=attempts {
            let draws: [LineDraw; 6] = std::array::from_fn(|_| method.draw(rng));
            match assemble_fresh(&draws, &self.resolver) {
                Ok((base, result, changing)) => {
                    return Cast {
                        base,
                        result,
                        changing,
                        mode: CastMode::Fresh,
                        quality: CastQuality::Clean,
                        draws: Some(draws),
                    };
                }
                Err(e) => tracing::warn!(attempt, error = %e, "fresh cast attempt failed"),
            }
        }

        tracing::error!(
            attempts,
            "fresh cast attempts exhausted, returning default 1 -> 2; check catalog integrity"
        );
        Cast {
            base: HexagramNumber::CREATIVE,
            result: HexagramNumber::RECEPTIVE,
            changing: ChangingLines::none(),
            mode: CastMode::Fresh,
            quality: CastQuality::Fallback,
            draws: None,
        }
    }

    fn cast_chained(&self, base: HexagramNumber, rng: &mut StdRng) -> Cast {
        let (min, max) = self.config.chained_changes;
        let min = min.clamp(1, 6);
        let count = rng.random_range(min..=max.clamp(min, 6));
        let changing: ChangingLines = index::sample(rng, 6, count)
            .into_iter()
            .filter_map(|i| LinePosition::new(i as u8 + 1).ok())
            .collect();

        match self.chained_target(base, changing) {
            Ok(result) => Cast {
                base,
                result,
                changing,
                mode: CastMode::Chained,
                quality: CastQuality::Clean,
                draws: None,
            },
            Err(e) => {
                let result = HexagramNumber::new(
                    rng.random_range(HexagramNumber::MIN..=HexagramNumber::MAX),
                )
                .unwrap_or(base);
                tracing::error!(
                    base = base.get(),
                    changing = %changing,
                    substitute = result.get(),
                    error = %e,
                    "chained cast did not resolve; substituting a random hexagram"
                );
                Cast {
                    base,
                    result,
                    changing,
                    mode: CastMode::Chained,
                    quality: CastQuality::Degraded,
                    draws: None,
                }
            }
        }
    }

    fn chained_target(
        &self,
        base: HexagramNumber,
        changing: ChangingLines,
    ) -> CoreResult<HexagramNumber> {
        match (&self.table, changing.highest()) {
            (Some(table), Some(pos)) if changing.len() == 1 => Ok(table.get(base, pos)),
            _ => transform::apply(&self.resolver, base, changing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::LineDrawMethod;
    use bagua_core::Line;
    use rand::SeedableRng;

    fn n(value: u8) -> HexagramNumber {
        HexagramNumber::new(value).unwrap()
    }

    fn caster(config: CasterConfig) -> DivinationCaster<&'static HexagramCatalog> {
        DivinationCaster::standard(config).unwrap()
    }

    fn seeded(seed: u64) -> DivinationSession {
        DivinationSession::with_rng(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn stable_draws_give_unchanged_hexagram() {
        use LineDraw::{YoungYang, YoungYin};
        let catalog = HexagramCatalog::standard().unwrap();

        let all_yang = [YoungYang; 6];
        let (base, result, changing) = assemble_fresh(&all_yang, catalog).unwrap();
        assert_eq!((base, result), (n(1), n(1)));
        assert!(changing.is_empty());

        let mixed = [YoungYang, YoungYin, YoungYin, YoungYang, YoungYin, YoungYin];
        let (base, result, changing) = assemble_fresh(&mixed, catalog).unwrap();
        assert_eq!(base, result);
        assert!(changing.is_empty());
    }

    #[test]
    fn old_lines_flip_into_result() {
        use LineDraw::{OldYang, OldYin, YoungYang};
        let catalog = HexagramCatalog::standard().unwrap();

        let draws = [OldYang, YoungYang, YoungYang, YoungYang, YoungYang, YoungYang];
        let (base, result, changing) = assemble_fresh(&draws, catalog).unwrap();
        assert_eq!((base, result), (n(1), n(44)));
        assert_eq!(changing, ChangingLines::from_values(&[1]).unwrap());

        let (base, result, changing) = assemble_fresh(&[OldYin; 6], catalog).unwrap();
        assert_eq!((base, result), (n(2), n(1)));
        assert_eq!(changing, ChangingLines::all());
    }

    #[test]
    fn fresh_then_chained_links_base_to_previous_result() {
        let caster = caster(CasterConfig::default());
        let mut session = seeded(11);

        let first = caster.cast(&mut session);
        assert_eq!(first.mode, CastMode::Fresh);
        assert_eq!(first.quality, CastQuality::Clean);
        assert!(first.draws.is_some());

        let second = caster.cast(&mut session);
        assert_eq!(second.mode, CastMode::Chained);
        assert_eq!(second.base, first.result);
        assert_eq!(session.cast_count(), 2);
    }

    #[test]
    fn chained_session_invariant() {
        let caster = caster(CasterConfig::default());
        let mut session = seeded(2024);

        let mut previous = caster.cast(&mut session);
        for step in 2..=25u32 {
            let cast = caster.cast(&mut session);
            assert_eq!(cast.base, previous.result);
            assert!((1..=3).contains(&cast.changing.len()));
            let expected = transform::apply(caster.resolver(), cast.base, cast.changing);
            assert_eq!(Ok(cast.result), expected);
            assert_eq!(session.cast_count(), step);
            previous = cast;
        }
        assert_eq!(session.previous_result(), Some(previous.result));
        assert_eq!(session.log().len(), 25);
    }

    #[test]
    fn reset_makes_next_cast_fresh() {
        let caster = caster(CasterConfig::default());
        let mut session = seeded(5);
        caster.cast(&mut session);
        caster.cast(&mut session);

        caster.reset(&mut session);
        assert!(session.is_fresh());
        assert_eq!(session.cast_count(), 0);

        let cast = caster.cast(&mut session);
        assert_eq!(cast.mode, CastMode::Fresh);
        assert_eq!(session.cast_count(), 1);
    }

    #[test]
    fn chained_change_count_follows_config() {
        let caster = caster(CasterConfig::default().with_chained_changes(4, 4));
        let mut session = seeded(8);
        caster.cast(&mut session);
        for _ in 0..10 {
            assert_eq!(caster.cast(&mut session).changing.len(), 4);
        }
    }

    #[test]
    fn seeded_sessions_repeat() {
        let config = CasterConfig::default().with_draw_method(LineDrawMethod::ThreeCoins);
        let caster = caster(config);
        let mut a = seeded(77);
        let mut b = seeded(77);
        for _ in 0..5 {
            assert_eq!(caster.cast(&mut a).triple(), caster.cast(&mut b).triple());
        }
    }

    #[test]
    fn caster_without_table_matches_table_caster() {
        let catalog = HexagramCatalog::standard().unwrap();
        let config = CasterConfig::default().with_chained_changes(1, 1);
        let plain = DivinationCaster::new(catalog, config.clone());
        let tabled = caster(config);
        let mut a = seeded(3);
        let mut b = seeded(3);
        for _ in 0..8 {
            assert_eq!(plain.cast(&mut a), tabled.cast(&mut b));
        }
    }

    /// Knows only hexagram 1, so nearly every pattern fails to resolve.
    struct OnlyCreative;

    impl PatternResolver for OnlyCreative {
        fn resolve(&self, lines: Lines) -> Option<HexagramNumber> {
            (lines.bits() == 0b11_1111).then_some(HexagramNumber::CREATIVE)
        }

        fn lines_of(&self, number: HexagramNumber) -> Option<Lines> {
            (number == HexagramNumber::CREATIVE).then(|| Lines::from_bottom_up([Line::Yang; 6]))
        }
    }

    #[test]
    fn broken_resolver_falls_back_then_degrades() {
        let config = CasterConfig::default().with_max_attempts(3);
        let caster = DivinationCaster::new(OnlyCreative, config);
        let mut session = seeded(1);

        let first = caster.cast(&mut session);
        assert_eq!(first.quality, CastQuality::Fallback);
        assert_eq!(first.triple(), (n(1), n(2), ChangingLines::none()));
        assert_eq!(session.previous_result(), Some(n(2)));
        assert_eq!(session.cast_count(), 1);

        let second = caster.cast(&mut session);
        assert_eq!(second.quality, CastQuality::Degraded);
        assert_eq!(second.base, n(2));
        assert!(!second.changing.is_empty());
        assert_eq!(session.previous_result(), Some(second.result));
        assert_eq!(session.cast_count(), 2);
    }

    #[test]
    fn chosen_cast_flips_the_picked_lines() {
        let catalog = HexagramCatalog::standard().unwrap();
        let cast = Cast::chosen(catalog, n(1), ChangingLines::from_values(&[1]).unwrap()).unwrap();
        assert_eq!(cast.triple().1, n(44));
        assert_eq!(cast.mode, CastMode::Chosen);
        assert_eq!(cast.quality, CastQuality::Clean);
        assert!(cast.draws.is_none());

        let still = Cast::chosen(catalog, n(30), ChangingLines::none()).unwrap();
        assert_eq!(still.result, n(30));
    }

    #[test]
    fn chosen_cast_reports_resolver_errors() {
        let changes = ChangingLines::from_values(&[2]).unwrap();
        let err = Cast::chosen(&OnlyCreative, n(1), changes).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedPattern(_)));
    }
}
