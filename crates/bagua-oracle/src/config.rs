//! Configuration for a divination caster.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::draw::LineDrawMethod;
use crate::log::DEFAULT_MAX_LOG_ENTRIES;

/// Configuration for casting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasterConfig {
    /// RNG seed for reproducible casts; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Full six-line draws a fresh cast may attempt before falling back.
    pub max_fresh_attempts: u32,
    /// Inclusive range for the number of lines a chained cast changes.
    pub chained_changes: (usize, usize),
    /// How fresh casts draw their lines.
    pub draw_method: LineDrawMethod,
    /// Most casts a session log keeps before dropping the oldest.
    pub max_log_entries: usize,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_fresh_attempts: 10,
            chained_changes: (1, 3),
            draw_method: LineDrawMethod::Uniform,
            max_log_entries: DEFAULT_MAX_LOG_ENTRIES,
        }
    }
}

impl CasterConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the fresh-cast attempt budget (at least 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_fresh_attempts = attempts.max(1);
        self
    }

    /// Set the chained change range, clamped into 1-6 with `min <= max`.
    pub fn with_chained_changes(mut self, min: usize, max: usize) -> Self {
        let min = min.clamp(1, 6);
        self.chained_changes = (min, max.clamp(min, 6));
        self
    }

    /// Set the line draw method.
    pub fn with_draw_method(mut self, method: LineDrawMethod) -> Self {
        self.draw_method = method;
        self
    }

    /// Set the session log limit (at least 1).
    pub fn with_max_log_entries(mut self, entries: usize) -> Self {
        self.max_log_entries = entries.max(1);
        self
    }

    /// A fresh RNG for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
