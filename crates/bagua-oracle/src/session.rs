//! Per-user divination state.
//!
//! A session is owned by one caller (one conversation, one terminal). It is
//! never shared; the hosting layer keeps one per user.

use bagua_core::HexagramNumber;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::caster::Cast;
use crate::config::CasterConfig;
use crate::log::CastLog;

/// State carried from one cast to the next.
#[derive(Debug)]
pub struct DivinationSession {
    id: Uuid,
    previous_result: Option<HexagramNumber>,
    cast_count: u32,
    log: CastLog,
    rng: StdRng,
}

impl DivinationSession {
    /// Start a fresh session using the configuration's seed and log limit.
    pub fn new(config: &CasterConfig) -> Self {
        let mut session = Self::with_rng(config.rng());
        session.log = CastLog::bounded(config.max_log_entries);
        session
    }

    /// Start a fresh session with an explicit random source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            previous_result: None,
            cast_count: 0,
            log: CastLog::new(),
            rng,
        }
    }

    /// Stable id, used to correlate log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The last cast's result, which seeds the next cast.
    pub fn previous_result(&self) -> Option<HexagramNumber> {
        self.previous_result
    }

    /// Casts since the session started or was last reset.
    pub fn cast_count(&self) -> u32 {
        self.cast_count
    }

    /// Whether the next cast starts fresh.
    pub fn is_fresh(&self) -> bool {
        self.previous_result.is_none()
    }

    /// The cast log.
    pub fn log(&self) -> &CastLog {
        &self.log
    }

    /// The session's random source.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub(crate) fn record(&mut self, cast: &Cast) {
        self.previous_result = Some(cast.result);
        self.cast_count = self.cast_count.saturating_add(1);
        self.log.append(cast.clone());
    }

    /// Return to the fresh state: no previous result, zero casts, empty log.
    ///
    /// The id and random source are kept.
    pub fn reset(&mut self) {
        self.previous_result = None;
        self.cast_count = 0;
        self.log.clear();
    }
}
