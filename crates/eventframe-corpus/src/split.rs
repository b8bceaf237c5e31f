//! Stratified train/dev/test split with optional oversampling

use crate::counts::LabelCounts;
use crate::error::{CorpusError, Result};
use crate::record::CorpusRecord;
use eventframe_domain::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Configuration for the splitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of each class placed in the dev split
    pub dev_fraction: f64,

    /// Share of each class placed in the test split
    pub test_fraction: f64,

    /// Seed of the shuffling generator
    pub seed: u64,

    /// Resample smaller train classes up to the largest one
    pub oversample_train: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            dev_fraction: 0.05,
            test_fraction: 0.05,
            seed: 42,
            oversample_train: true,
        }
    }
}

impl SplitConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("dev_fraction", self.dev_fraction),
            ("test_fraction", self.test_fraction),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(format!("{} {} out of range [0.0, 1.0)", name, value));
            }
        }
        if self.dev_fraction + self.test_fraction >= 1.0 {
            return Err("dev_fraction + test_fraction must be below 1.0".to_string());
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

/// The three splits
#[derive(Debug, Clone, Default)]
pub struct DatasetSplit {
    /// Training records
    pub train: Vec<CorpusRecord>,
    /// Development records
    pub dev: Vec<CorpusRecord>,
    /// Test records
    pub test: Vec<CorpusRecord>,
}

impl DatasetSplit {
    /// Label distribution of each split, in train/dev/test order
    pub fn counts(&self) -> [LabelCounts; 3] {
        [
            LabelCounts::from_records(&self.train),
            LabelCounts::from_records(&self.dev),
            LabelCounts::from_records(&self.test),
        ]
    }
}

/// Per-class splitter
#[derive(Debug, Clone, Default)]
pub struct StratifiedSplitter {
    config: SplitConfig,
}

/// Held-out sizes for a class of `n` records, never the whole class
fn held_out(n: usize, dev_fraction: f64, test_fraction: f64) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut dev = (n as f64 * dev_fraction).round() as usize;
    let mut test = (n as f64 * test_fraction).round() as usize;
    while dev + test >= n {
        if dev >= test && dev > 0 {
            dev -= 1;
        } else {
            test -= 1;
        }
    }
    (dev, test)
}

impl StratifiedSplitter {
    /// Create a splitter
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Split a labeled corpus
    ///
    /// `ERROR_API` records are left out of every split.
    ///
    /// # Errors
    /// Returns error if any record is unlabeled or the config is invalid
    pub fn split(&self, records: Vec<CorpusRecord>) -> Result<DatasetSplit> {
        self.config.validate().map_err(CorpusError::Config)?;

        let mut groups: BTreeMap<Label, Vec<CorpusRecord>> = BTreeMap::new();
        let mut skipped = 0;
        for (index, record) in records.into_iter().enumerate() {
            match record.label {
                None => return Err(CorpusError::Unlabeled { index }),
                Some(Label::ErrorApi) => skipped += 1,
                Some(label) => groups.entry(label).or_default().push(record),
            }
        }
        if skipped > 0 {
            info!("Excluding {} ERROR_API records from the split", skipped);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut split = DatasetSplit::default();
        let mut train_groups = Vec::with_capacity(groups.len());

        for (_, mut group) in groups {
            group.shuffle(&mut rng);
            let (dev, test) =
                held_out(group.len(), self.config.dev_fraction, self.config.test_fraction);
            let train = group.split_off(dev + test);
            let dev_records = group.split_off(test);
            split.test.extend(group);
            split.dev.extend(dev_records);
            train_groups.push(train);
        }

        if self.config.oversample_train {
            let largest = train_groups.iter().map(Vec::len).max().unwrap_or(0);
            for group in &mut train_groups {
                let originals = group.clone();
                while !originals.is_empty() && group.len() < largest {
                    if let Some(extra) = originals.choose(&mut rng) {
                        group.push(extra.clone());
                    }
                }
            }
        }

        split.train = train_groups.into_iter().flatten().collect();
        split.train.shuffle(&mut rng);
        split.dev.shuffle(&mut rng);
        split.test.shuffle(&mut rng);

        info!(
            "Split: {} train, {} dev, {} test",
            split.train.len(),
            split.dev.len(),
            split.test.len()
        );

        Ok(split)
    }
}
