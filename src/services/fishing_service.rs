use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::domain::fishing::{level_tag, FishingConfig, FishingCounters};
use crate::storage::traits::KvStore;

/// Successful-catch counter key, integer-string encoded.
pub const TIMES_KEY: &str = "fcl_fishing_times";
/// Caught-article click counter key, integer-string encoded.
pub const CLICKS_KEY: &str = "fcl_fishing_clicks";

/// Decision logic and counter persistence for the fishing mechanic.
/// Counters outlive the process; unreadable values load as zero.
pub struct FishingService<K: KvStore> {
    kv: K,
    config: FishingConfig,
    counters: FishingCounters,
}

impl<K: KvStore> FishingService<K> {
    pub fn new(kv: K, config: FishingConfig) -> Self {
        let counters = FishingCounters {
            times: read_counter(&kv, TIMES_KEY),
            clicks: read_counter(&kv, CLICKS_KEY),
        };
        Self {
            kv,
            config,
            counters,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn counters(&self) -> FishingCounters {
        self.counters
    }

    /// A caught article was clicked; this feeds the hunger cure.
    pub fn record_click(&mut self) {
        self.counters.clicks += 1;
        self.persist(CLICKS_KEY, self.counters.clicks);
    }

    /// A roll succeeded. Never called on a starved roll.
    pub fn record_catch(&mut self) {
        self.counters.times += 1;
        self.persist(TIMES_KEY, self.counters.times);
    }

    fn persist(&self, key: &str, value: u64) {
        if let Err(e) = self.kv.set(key, &value.to_string()) {
            warn!(key, error = %e, "failed to persist fishing counter");
        }
    }

    /// Whether this roll starves: requires the hunger predicate, then a
    /// fair coin.
    pub fn starved_roll(&self, rng: &mut impl Rng) -> bool {
        self.counters.is_hungry(&self.config) && rng.gen_bool(0.5)
    }

    /// Artificial cast delay, uniform in [1000, 3000) ms; the very first
    /// catch ever is instant.
    pub fn cast_delay(&self, rng: &mut impl Rng) -> Duration {
        if self.counters.times == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rng.gen_range(1000..3000))
        }
    }

    pub fn level_tag(&self) -> Option<String> {
        level_tag(self.counters.times)
    }
}

fn read_counter<K: KvStore>(kv: &K, key: &str) -> u64 {
    kv.get(key)
        .ok()
        .flatten()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}
