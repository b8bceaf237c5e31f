//! Corpus Balancer
//!
//! Down-samples the `NO_EVENT` majority so that the dataset reaches a target
//! size while every event record is kept.

use crate::counts::LabelCounts;
use crate::error::{CorpusError, Result};
use crate::record::CorpusRecord;
use eventframe_domain::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration for the balancer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Desired output size
    pub target_size: usize,

    /// Seed of the shuffling generator
    pub seed: u64,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            target_size: 2000,
            seed: 42,
        }
    }
}

impl BalancerConfig {
    /// Larger target used for the full training set
    pub fn full() -> Self {
        Self {
            target_size: 9000,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.target_size == 0 {
            return Err("target_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> std::result::Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Output of a balancing run
#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    /// Shuffled balanced records
    pub records: Vec<CorpusRecord>,

    /// Label distribution of `records`
    pub counts: LabelCounts,
}

/// Reproducible down-sampler for the no-event class
#[derive(Debug, Clone, Default)]
pub struct CorpusBalancer {
    config: BalancerConfig,
}

impl CorpusBalancer {
    /// Create a balancer
    pub fn new(config: BalancerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Balance a fully labeled corpus
    ///
    /// Event records (including `ERROR_API`) are all kept. `NO_EVENT`
    /// records are shuffled and the first `target - events` retained (all
    /// of them if there are fewer). The union is shuffled again with the
    /// same generator, so the output is a pure function of input and seed.
    ///
    /// # Errors
    /// Returns error if any record is unlabeled or the config is invalid
    pub fn balance(&self, records: Vec<CorpusRecord>) -> Result<BalanceOutcome> {
        self.config.validate().map_err(CorpusError::Config)?;

        let mut events = Vec::new();
        let mut no_events = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            match record.label {
                None => return Err(CorpusError::Unlabeled { index }),
                Some(Label::NoEvent) => no_events.push(record),
                Some(_) => events.push(record),
            }
        }

        let target = self.config.target_size;
        if events.len() > target {
            warn!(
                "{} event records exceed target size {}; keeping all of them",
                events.len(),
                target
            );
        }
        let needed = target.saturating_sub(events.len());

        info!(
            "Balancing: {} events, {} no-event, {} no-event needed",
            events.len(),
            no_events.len(),
            needed
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        no_events.shuffle(&mut rng);
        no_events.truncate(needed);

        let mut balanced = events;
        balanced.extend(no_events);
        balanced.shuffle(&mut rng);

        let counts = LabelCounts::from_records(&balanced);
        info!("Balanced corpus: {} records {}", balanced.len(), counts);

        Ok(BalanceOutcome {
            records: balanced,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(no_events: usize, events: usize) -> Vec<CorpusRecord> {
        let mut records: Vec<CorpusRecord> = (0..no_events)
            .map(|i| CorpusRecord::labeled(format!("nic {}", i), Label::NoEvent))
            .collect();
        records.extend(
            (0..events).map(|i| CorpusRecord::labeled(format!("zdarzenie {}", i), Label::Crime)),
        );
        records
    }

    #[test]
    fn test_hundred_and_twenty_to_fifty() {
        let balancer = CorpusBalancer::new(BalancerConfig {
            target_size: 50,
            seed: 42,
        });
        let outcome = balancer.balance(corpus(100, 20)).unwrap();
        assert_eq!(outcome.records.len(), 50);
        assert_eq!(outcome.counts.get(Label::Crime), 20);
        assert_eq!(outcome.counts.get(Label::NoEvent), 30);
    }

    #[test]
    fn test_short_corpus_keeps_everything() {
        let outcome = CorpusBalancer::default().balance(corpus(10, 5)).unwrap();
        assert_eq!(outcome.records.len(), 15);
    }

    #[test]
    fn test_too_many_events_drops_all_no_events() {
        let balancer = CorpusBalancer::new(BalancerConfig {
            target_size: 10,
            seed: 1,
        });
        let outcome = balancer.balance(corpus(30, 12)).unwrap();
        assert_eq!(outcome.records.len(), 12);
        assert_eq!(outcome.counts.get(Label::NoEvent), 0);
    }

    #[test]
    fn test_error_api_counts_as_event() {
        let mut records = corpus(5, 0);
        records.push(CorpusRecord::labeled("zepsute", Label::ErrorApi));
        let balancer = CorpusBalancer::new(BalancerConfig {
            target_size: 3,
            seed: 42,
        });
        let outcome = balancer.balance(records).unwrap();
        assert_eq!(outcome.counts.get(Label::ErrorApi), 1);
        assert_eq!(outcome.counts.get(Label::NoEvent), 2);
    }

    #[test]
    fn test_unlabeled_rejected() {
        let mut records = corpus(3, 1);
        records.insert(2, CorpusRecord::new("bez etykiety"));
        let result = CorpusBalancer::default().balance(records);
        assert!(matches!(result, Err(CorpusError::Unlabeled { index: 2 })));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = BalancerConfig::full();
        let parsed = BalancerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
        assert_eq!(BalancerConfig::from_toml("seed = 7").unwrap().target_size, 2000);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every event record survives balancing
            #[test]
            fn prop_events_never_dropped(
                no_events in 0usize..60,
                events in 0usize..30,
                target in 1usize..80,
                seed in any::<u64>(),
            ) {
                let balancer = CorpusBalancer::new(BalancerConfig { target_size: target, seed });
                let outcome = balancer.balance(corpus(no_events, events)).unwrap();
                prop_assert_eq!(outcome.counts.get(Label::Crime), events);
                prop_assert_eq!(
                    outcome.records.len(),
                    events + no_events.min(target.saturating_sub(events))
                );
            }

            /// Property: same input and seed give the same output order
            #[test]
            fn prop_reproducible(
                no_events in 0usize..40,
                events in 0usize..20,
                seed in any::<u64>(),
            ) {
                let balancer = CorpusBalancer::new(BalancerConfig { target_size: 25, seed });
                let first = balancer.balance(corpus(no_events, events)).unwrap();
                let second = balancer.balance(corpus(no_events, events)).unwrap();
                prop_assert_eq!(first.records, second.records);
            }
        }
    }
}
