//! # augur-session
//!
//! The per-(user, game) prediction session state machine and the `Augur`
//! facade the transport layer talks to. Requests flow
//! `Idle → Gated → Matching → Issued → Resolved → Idle`; same-pair
//! operations are serialized through a `DashMap` entry lock, different pairs
//! run concurrently.

pub mod analytics;
pub mod engine;
pub mod session;

pub use analytics::{GameStats, UserAnalytics};
pub use engine::{Augur, RequestOutcome};
pub use session::{PairSession, Phase};
