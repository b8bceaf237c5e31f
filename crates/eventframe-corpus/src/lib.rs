//! EventFrame Corpus
//!
//! Records, JSON corpus files and the dataset-shaping steps that follow
//! annotation: label distribution, no-event down-sampling and the
//! stratified train/dev/test split.
//!
//! All random choices go through a `StdRng` seeded from configuration, so a
//! run is reproducible from its input and seed.
//!
//! ```
//! use eventframe_corpus::{BalancerConfig, CorpusBalancer, CorpusRecord};
//! use eventframe_domain::Label;
//!
//! let mut records: Vec<CorpusRecord> = (0..100)
//!     .map(|i| CorpusRecord::labeled(format!("zdanie {}", i), Label::NoEvent))
//!     .collect();
//! records.extend((0..20).map(|i| CorpusRecord::labeled(format!("kradzież {}", i), Label::Crime)));
//!
//! let balancer = CorpusBalancer::new(BalancerConfig { target_size: 50, seed: 42 });
//! let outcome = balancer.balance(records).unwrap();
//! assert_eq!(outcome.records.len(), 50);
//! assert_eq!(outcome.counts.get(Label::Crime), 20);
//! ```

#![warn(missing_docs)]

pub mod balance;
pub mod counts;
pub mod error;
pub mod io;
pub mod record;
pub mod split;

pub use balance::{BalanceOutcome, BalancerConfig, CorpusBalancer};
pub use counts::LabelCounts;
pub use error::CorpusError;
pub use io::{load_corpus, save_corpus};
pub use record::CorpusRecord;
pub use split::{DatasetSplit, SplitConfig, StratifiedSplitter};
