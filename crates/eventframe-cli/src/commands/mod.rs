//! Command implementations.

pub mod analyze;
pub mod annotate;
pub mod balance;
pub mod config;
pub mod split;

pub use self::analyze::execute_analyze;
pub use self::annotate::execute_annotate;
pub use self::balance::execute_balance;
pub use self::config::execute_config;
pub use self::split::execute_split;
