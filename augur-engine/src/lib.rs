//! # augur-engine
//!
//! The in-memory state engines behind Augur predictions: the game catalog
//! with its per-game pattern store, the rolling per-(user, game) result
//! history, the pure suffix matcher, and the cooldown manager.
//!
//! Nothing here blocks on I/O; concurrency safety comes from `DashMap`
//! entry locks, scoped per key.

pub mod catalog;
pub mod cooldown;
pub mod history;
pub mod matcher;

pub use catalog::GameCatalog;
pub use cooldown::{CooldownManager, Gate};
pub use history::HistoryTracker;
pub use matcher::{predict, Match};
