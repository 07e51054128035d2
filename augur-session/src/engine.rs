//! The `Augur` facade: orchestrates catalog, history, matcher, and cooldown
//! behind the session state machine.
//!
//! Lock discipline: membership/quota gates and catalog reads happen before
//! the pair's session entry is taken; history and cooldown are only touched
//! while it is held; the log sink is invoked after it is released. Same-pair
//! requests therefore serialize on the entry lock while different pairs run
//! concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use augur_core::config::AugurConfig;
use augur_core::errors::{AugurResult, CatalogError, SessionError};
use augur_core::models::{
    Axis, EngineSnapshot, Game, Label, LogRecord, PairKey, PairSnapshot, Pattern, PendingId,
    PredictionRecord, PredictionRequest, PredictionStatus, ResolvedPrediction, UserId, Verdict,
};
use augur_core::traits::{BoxError, MembershipGate, PredictionSink, QuotaGate, SnapshotStore};
use augur_engine::{matcher, CooldownManager, Gate, GameCatalog, HistoryTracker};

use crate::analytics::UserAnalytics;
use crate::session::{PairSession, Phase};

/// What a prediction request resolves to when it doesn't error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A prediction was issued and awaits the user's verdict.
    Issued {
        outcome: Label,
        match_count: usize,
        pending_id: PendingId,
    },
    /// The pair is still cooling down; nothing was issued.
    Cooldown { remaining: Duration },
}

/// The prediction engine facade.
pub struct Augur {
    config: AugurConfig,
    catalog: GameCatalog,
    history: HistoryTracker,
    cooldown: CooldownManager,
    sessions: DashMap<PairKey, PairSession>,
    pending_index: DashMap<PendingId, PairKey>,
    archive: DashMap<UserId, UserAnalytics>,
    membership: Option<Arc<dyn MembershipGate>>,
    quota: Option<Arc<dyn QuotaGate>>,
    sink: Option<Arc<dyn PredictionSink>>,
}

impl Augur {
    /// An engine with the stock game catalog and no collaborators attached.
    pub fn new(config: AugurConfig) -> Self {
        let catalog =
            GameCatalog::with_defaults(config.pattern.clone(), config.catalog.clone());
        Self {
            config,
            catalog,
            history: HistoryTracker::new(),
            cooldown: CooldownManager::new(),
            sessions: DashMap::new(),
            pending_index: DashMap::new(),
            archive: DashMap::new(),
            membership: None,
            quota: None,
            sink: None,
        }
    }

    /// Attach the forced-channel membership check.
    pub fn with_membership_gate(mut self, gate: Arc<dyn MembershipGate>) -> Self {
        self.membership = Some(gate);
        self
    }

    /// Attach the plan/quota check.
    pub fn with_quota_gate(mut self, gate: Arc<dyn QuotaGate>) -> Self {
        self.quota = Some(gate);
        self
    }

    /// Attach the log channel sink.
    pub fn with_sink(mut self, sink: Arc<dyn PredictionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // --- Prediction flow ---

    /// Run a request through the session state machine:
    /// gates → seeded check → cooldown → match → issue.
    pub fn request_prediction(&self, req: &PredictionRequest) -> AugurResult<RequestOutcome> {
        // Boundary gates run before any lock is taken.
        if let Some(gate) = &self.membership {
            if !gate.is_member(req.user) {
                return Err(SessionError::NotMember.into());
            }
        }
        if let Some(gate) = &self.quota {
            if !gate.may_predict(req.user, req.timestamp) {
                return Err(SessionError::QuotaExceeded.into());
            }
        }
        if !self.catalog.has_app(&req.app) {
            return Err(CatalogError::UnknownApp(req.app.clone()).into());
        }
        let game = self.catalog.game(&req.game)?;
        let key = PairKey::new(req.user, game.name.clone());

        let mut session = self.sessions.entry(key.clone()).or_default();

        let history = match self.history.get(&key) {
            Ok(history) => history,
            Err(err) => {
                session.phase = Phase::AwaitingSeed;
                debug!(pair = %key, "request before history seed");
                return Err(err.into());
            }
        };

        match self
            .cooldown
            .check_and_record(&key, game.cooldown_secs, req.timestamp)
        {
            Gate::Ready => {}
            Gate::Wait(remaining) => {
                debug!(
                    pair = %key,
                    remaining_secs = remaining.num_seconds(),
                    "request denied by cooldown"
                );
                return Ok(RequestOutcome::Cooldown { remaining });
            }
        }

        let matched = matcher::predict(&history, &game.patterns)?;

        // Only a request that actually issues replaces a prediction still
        // awaiting its verdict.
        if let Some(mut stale) = session.take_pending() {
            stale.status = PredictionStatus::Superseded;
            self.pending_index.remove(&stale.id);
            debug!(pair = %key, pending = %stale.id, "pending prediction superseded");
        }

        let record = PredictionRecord {
            id: Uuid::new_v4(),
            user: req.user,
            app: req.app.clone(),
            game: game.name.clone(),
            outcome: matched.outcome,
            match_count: matched.match_count,
            history,
            issued_at: req.timestamp,
            status: PredictionStatus::Pending,
        };
        let pending_id = record.id;
        self.pending_index.insert(pending_id, key.clone());
        info!(
            pair = %key,
            outcome = %matched.outcome,
            matches = matched.match_count,
            "prediction issued"
        );
        session.phase = Phase::Issued(record);

        Ok(RequestOutcome::Issued {
            outcome: matched.outcome,
            match_count: matched.match_count,
            pending_id,
        })
    }

    /// Resolve a pending prediction with the user's verdict. A correct
    /// verdict advances the history with the predicted outcome and emits a
    /// log record; a wrong verdict only archives.
    pub fn confirm(
        &self,
        pending_id: PendingId,
        verdict: Verdict,
        now: DateTime<Utc>,
    ) -> AugurResult<ResolvedPrediction> {
        let key = self
            .pending_index
            .get(&pending_id)
            .map(|r| r.value().clone())
            .ok_or(SessionError::NotPending)?;

        let resolved = {
            let mut session = self
                .sessions
                .get_mut(&key)
                .ok_or(SessionError::NotPending)?;
            let record = match session.pending() {
                Some(record) if record.id == pending_id => record.clone(),
                _ => return Err(SessionError::NotPending.into()),
            };

            if self.is_expired(&record, now) {
                session.phase = Phase::Idle;
                self.pending_index.remove(&pending_id);
                debug!(pair = %key, pending = %pending_id, "verdict after ttl; prediction expired");
                return Err(SessionError::Expired.into());
            }

            session.phase = Phase::Idle;
            self.pending_index.remove(&pending_id);

            if verdict == Verdict::Correct {
                // The confirmed prediction becomes the newest observed result.
                self.history.append_evict(&key, record.outcome)?;
            }

            let resolved = ResolvedPrediction {
                user: record.user,
                app: record.app,
                game: record.game,
                outcome: record.outcome,
                verdict,
                resolved_at: now,
            };
            self.archive
                .entry(resolved.user)
                .or_default()
                .record(resolved.clone());
            info!(pair = %key, outcome = %resolved.outcome, ?verdict, "prediction resolved");
            resolved
        };

        // Entry lock released; emission is best-effort boundary I/O.
        if verdict == Verdict::Correct {
            self.emit_log(&resolved);
        }
        Ok(resolved)
    }

    /// One-time history initialization for a pair. Labels must match the
    /// game's axis and number exactly the window length.
    pub fn seed_history(
        &self,
        user: UserId,
        game: &str,
        labels: Vec<Label>,
    ) -> AugurResult<()> {
        let game = self.catalog.game(game)?;
        if let Some(bad) = labels.iter().find(|l| !game.axis.permits(**l)) {
            return Err(CatalogError::InvalidSequence {
                reason: format!("label {bad} not valid for this game"),
            }
            .into());
        }
        let key = PairKey::new(user, game.name.clone());
        let mut session = self.sessions.entry(key.clone()).or_default();
        self.history.seed(key, labels)?;
        if session.phase == Phase::AwaitingSeed {
            session.phase = Phase::Idle;
        }
        Ok(())
    }

    /// The pair's current window, oldest first.
    pub fn history(&self, user: UserId, game: &str) -> AugurResult<Vec<Label>> {
        let game = self.catalog.game(game)?;
        Ok(self.history.get(&PairKey::new(user, game.name))?)
    }

    /// Append an actually observed result to the pair's history, used after
    /// a wrong-confirmed prediction. Refused while a prediction is still
    /// awaiting its verdict.
    pub fn report_outcome(
        &self,
        user: UserId,
        game: &str,
        label: Label,
        now: DateTime<Utc>,
    ) -> AugurResult<Vec<Label>> {
        let game = self.catalog.game(game)?;
        if !game.axis.permits(label) {
            return Err(CatalogError::InvalidSequence {
                reason: format!("label {label} not valid for this game"),
            }
            .into());
        }
        let key = PairKey::new(user, game.name.clone());
        let mut session = self.sessions.entry(key.clone()).or_default();

        let expired_id = match session.pending() {
            Some(record) if self.is_expired(record, now) => Some(record.id),
            Some(_) => return Err(SessionError::PredictionPending.into()),
            None => None,
        };
        if let Some(id) = expired_id {
            session.phase = Phase::Idle;
            self.pending_index.remove(&id);
            debug!(pair = %key, pending = %id, "stale pending prediction discarded");
        }

        let updated = self.history.append_evict(&key, label)?;
        info!(pair = %key, label = %label, "observed outcome appended");
        Ok(updated)
    }

    // --- Admin surface ---

    pub fn add_game(
        &self,
        name: &str,
        axis: Axis,
        cooldown_secs: Option<u64>,
    ) -> AugurResult<()> {
        Ok(self.catalog.add_game(name, axis, cooldown_secs)?)
    }

    pub fn delete_game(&self, name: &str) -> AugurResult<()> {
        Ok(self.catalog.delete_game(name)?)
    }

    pub fn set_cooldown(&self, game: &str, cooldown_secs: u64) -> AugurResult<()> {
        Ok(self.catalog.set_cooldown(game, cooldown_secs)?)
    }

    pub fn add_pattern(
        &self,
        game: &str,
        sequence: Vec<Label>,
        outcome: Label,
    ) -> AugurResult<()> {
        Ok(self.catalog.add_pattern(game, sequence, outcome)?)
    }

    pub fn remove_pattern(&self, game: &str, sequence: &[Label]) -> AugurResult<()> {
        Ok(self.catalog.remove_pattern(game, sequence)?)
    }

    pub fn list_patterns(&self, game: &str) -> AugurResult<Vec<Pattern>> {
        Ok(self.catalog.list_patterns(game)?)
    }

    pub fn add_app(&self, name: &str) -> AugurResult<()> {
        Ok(self.catalog.add_app(name)?)
    }

    pub fn remove_app(&self, name: &str) -> AugurResult<()> {
        Ok(self.catalog.remove_app(name)?)
    }

    pub fn games(&self) -> Vec<Game> {
        self.catalog.games()
    }

    pub fn apps(&self) -> Vec<String> {
        self.catalog.apps()
    }

    /// Administrative history clear for a pair. Any pending prediction is
    /// discarded so a stale verdict cannot touch the fresh seed.
    pub fn reset_history(&self, user: UserId, game: &str) -> AugurResult<()> {
        let game = self.catalog.game(game)?;
        let key = PairKey::new(user, game.name);
        let mut session = self.sessions.entry(key.clone()).or_default();
        if let Some(stale) = session.take_pending() {
            self.pending_index.remove(&stale.id);
        }
        self.history.reset(&key);
        info!(pair = %key, "history reset");
        Ok(())
    }

    /// Administrative cooldown clear for a pair.
    pub fn reset_cooldown(&self, user: UserId, game: &str) -> AugurResult<()> {
        let game = self.catalog.game(game)?;
        let key = PairKey::new(user, game.name);
        self.cooldown.reset(&key);
        info!(pair = %key, "cooldown reset");
        Ok(())
    }

    /// A user's archive of resolved predictions, if any.
    pub fn user_analytics(&self, user: UserId) -> Option<UserAnalytics> {
        self.archive.get(&user).map(|r| r.clone())
    }

    // --- Persistence ---

    /// Serialize the durable state: catalog, per-pair windows and cooldown
    /// timestamps, and the archive. Pending records are ephemeral and not
    /// included.
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut pairs: HashMap<PairKey, PairSnapshot> = HashMap::new();
        for (key, history) in self.history.pairs() {
            pairs.insert(
                key.clone(),
                PairSnapshot {
                    user: key.user,
                    game: key.game,
                    history: Some(history),
                    last_issued_at: None,
                },
            );
        }
        for (key, at) in self.cooldown.pairs() {
            let entry = pairs.entry(key.clone()).or_insert_with(|| PairSnapshot {
                user: key.user,
                game: key.game.clone(),
                history: None,
                last_issued_at: None,
            });
            entry.last_issued_at = Some(at);
        }
        let mut pairs: Vec<PairSnapshot> = pairs.into_values().collect();
        pairs.sort_by(|a, b| (a.user, &a.game).cmp(&(b.user, &b.game)));

        let mut archive: Vec<ResolvedPrediction> = self
            .archive
            .iter()
            .flat_map(|r| r.value().resolved.clone())
            .collect();
        archive.sort_by(|a, b| (a.resolved_at, a.user).cmp(&(b.resolved_at, b.user)));

        EngineSnapshot {
            games: self.catalog.games(),
            apps: self.catalog.apps(),
            pairs,
            archive,
        }
    }

    /// Rebuild an engine from a snapshot.
    pub fn from_snapshot(config: AugurConfig, snapshot: EngineSnapshot) -> AugurResult<Self> {
        let augur = Self::new(config);
        augur.catalog.restore(snapshot.games, snapshot.apps);
        for pair in snapshot.pairs {
            let key = PairKey::new(pair.user, pair.game);
            if let Some(history) = pair.history {
                augur.history.restore(key.clone(), history)?;
            }
            if let Some(at) = pair.last_issued_at {
                augur.cooldown.restore(key, at);
            }
        }
        for row in snapshot.archive {
            augur.archive.entry(row.user).or_default().record(row);
        }
        Ok(augur)
    }

    /// Persist through the storage collaborator.
    pub fn save_to(&self, store: &dyn SnapshotStore) -> Result<(), BoxError> {
        store.store(&self.snapshot())
    }

    /// Restore through the storage collaborator; a fresh engine when nothing
    /// was ever stored.
    pub fn load_from(config: AugurConfig, store: &dyn SnapshotStore) -> Result<Self, BoxError> {
        match store.load()? {
            Some(snapshot) => {
                Self::from_snapshot(config, snapshot).map_err(|e| Box::new(e) as BoxError)
            }
            None => Ok(Self::new(config)),
        }
    }

    // --- Internals ---

    fn is_expired(&self, record: &PredictionRecord, now: DateTime<Utc>) -> bool {
        let ttl = Duration::seconds(self.config.session.pending_ttl_secs as i64);
        now - record.issued_at > ttl
    }

    fn emit_log(&self, resolved: &ResolvedPrediction) {
        let Some(sink) = &self.sink else { return };
        let record = LogRecord {
            app: resolved.app.clone(),
            game: resolved.game.clone(),
            outcome: resolved.outcome,
            timestamp: resolved.resolved_at,
        };
        if let Err(err) = sink.emit(&record) {
            warn!(error = %err, "log sink emission failed");
        }
    }
}
