//! End-to-end tests for the prediction session flow.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use augur_core::config::AugurConfig;
use augur_core::errors::{AugurError, CatalogError, HistoryError, MatchError, SessionError};
use augur_core::models::{Label, LogRecord, PendingId, PredictionRequest, UserId, Verdict};
use augur_core::traits::{BoxError, MembershipGate, PredictionSink, QuotaGate};
use augur_session::{Augur, RequestOutcome};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("augur_session=debug,augur_engine=debug")
        .with_test_writer()
        .try_init();
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn labels(csv: &str) -> Vec<Label> {
    csv.split(',').map(|s| s.trim().parse().unwrap()).collect()
}

fn l(s: &str) -> Label {
    s.parse().unwrap()
}

fn request(user: UserId, game: &str, secs: i64) -> PredictionRequest {
    PredictionRequest {
        user,
        app: "1win".to_string(),
        game: game.to_string(),
        timestamp: at(secs),
    }
}

/// Request a prediction and unwrap the issued outcome.
fn issue(augur: &Augur, user: UserId, game: &str, secs: i64) -> (Label, usize, PendingId) {
    match augur.request_prediction(&request(user, game, secs)).unwrap() {
        RequestOutcome::Issued {
            outcome,
            match_count,
            pending_id,
        } => (outcome, match_count, pending_id),
        other => panic!("expected an issued prediction, got {other:?}"),
    }
}

/// Sink that records every emission and can be flipped to fail.
#[derive(Default)]
struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    fail: AtomicBool,
}

impl PredictionSink for MemorySink {
    fn emit(&self, record: &LogRecord) -> Result<(), BoxError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("log channel unreachable".into());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct DenyAll;

impl MembershipGate for DenyAll {
    fn is_member(&self, _user: UserId) -> bool {
        false
    }
}

struct NoQuota;

impl QuotaGate for NoQuota {
    fn may_predict(&self, _user: UserId, _now: DateTime<Utc>) -> bool {
        false
    }
}

const SEED: &str = "Big,Small,Big,Big,Small,Big,Small,Small,Big,Small";

fn engine_with_wingo_pattern() -> Augur {
    init_tracing();
    let augur = Augur::new(AugurConfig::default());
    augur
        .add_pattern("WINGO", labels("Small,Small,Big,Small"), l("Big"))
        .unwrap();
    augur
}

// ── The end-to-end scenario ───────────────────────────────────────────────

#[test]
fn correct_confirmation_advances_history() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (outcome, match_count, pending_id) = issue(&augur, 1, "WINGO", 0);
    assert_eq!(outcome, l("Big"));
    assert_eq!(match_count, 1);

    let resolved = augur.confirm(pending_id, Verdict::Correct, at(5)).unwrap();
    assert_eq!(resolved.outcome, l("Big"));

    assert_eq!(
        augur.history(1, "WINGO").unwrap(),
        labels("Small,Big,Big,Small,Big,Small,Small,Big,Small,Big")
    );
}

#[test]
fn wrong_confirmation_leaves_history_untouched() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(5)).unwrap();
    assert_eq!(augur.history(1, "WINGO").unwrap(), labels(SEED));
}

// ── Eligibility and gating ────────────────────────────────────────────────

#[test]
fn request_before_seed_is_refused() {
    let augur = engine_with_wingo_pattern();
    let err = augur
        .request_prediction(&request(1, "WINGO", 0))
        .unwrap_err();
    assert_eq!(err, AugurError::History(HistoryError::NotSeeded));

    // Seeding unblocks the same pair.
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();
    issue(&augur, 1, "WINGO", 1);
}

#[test]
fn cooldown_is_surfaced_not_errored() {
    let augur = engine_with_wingo_pattern();
    augur.set_cooldown("WINGO", 60).unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(1)).unwrap();

    match augur.request_prediction(&request(1, "WINGO", 30)).unwrap() {
        RequestOutcome::Cooldown { remaining } => {
            assert_eq!(remaining.num_seconds(), 30);
        }
        other => panic!("expected cooldown, got {other:?}"),
    }

    // The denied attempt did not extend the window.
    issue(&augur, 1, "WINGO", 61);
}

#[test]
fn no_matching_pattern_refuses_prediction() {
    init_tracing();
    let augur = Augur::new(AugurConfig::default());
    augur
        .add_pattern("WINGO", labels("Big,Big,Big"), l("Small"))
        .unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let err = augur
        .request_prediction(&request(1, "WINGO", 0))
        .unwrap_err();
    assert_eq!(err, AugurError::Match(MatchError::NoMatch));
}

#[test]
fn unknown_game_and_app_are_named_errors() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let err = augur
        .request_prediction(&request(1, "AVIATOR", 0))
        .unwrap_err();
    assert_eq!(
        err,
        AugurError::Catalog(CatalogError::UnknownGame("AVIATOR".to_string()))
    );

    let mut req = request(1, "WINGO", 0);
    req.app = "NoSuchApp".to_string();
    let err = augur.request_prediction(&req).unwrap_err();
    assert_eq!(
        err,
        AugurError::Catalog(CatalogError::UnknownApp("NoSuchApp".to_string()))
    );
}

#[test]
fn membership_and_quota_gates_block_requests() {
    init_tracing();
    let denied = Augur::new(AugurConfig::default()).with_membership_gate(Arc::new(DenyAll));
    assert_eq!(
        denied
            .request_prediction(&request(1, "WINGO", 0))
            .unwrap_err(),
        AugurError::Session(SessionError::NotMember)
    );

    let throttled = Augur::new(AugurConfig::default()).with_quota_gate(Arc::new(NoQuota));
    assert_eq!(
        throttled
            .request_prediction(&request(1, "WINGO", 0))
            .unwrap_err(),
        AugurError::Session(SessionError::QuotaExceeded)
    );
}

// ── Pending-record lifecycle ──────────────────────────────────────────────

#[test]
fn stale_verdict_after_ttl_is_expired() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);

    // Default TTL is 300s; a verdict at +301 is too late.
    let err = augur
        .confirm(pending_id, Verdict::Correct, at(301))
        .unwrap_err();
    assert_eq!(err, AugurError::Session(SessionError::Expired));
    assert_eq!(augur.history(1, "WINGO").unwrap(), labels(SEED));

    // The record is gone entirely.
    assert_eq!(
        augur
            .confirm(pending_id, Verdict::Correct, at(302))
            .unwrap_err(),
        AugurError::Session(SessionError::NotPending)
    );
}

#[test]
fn verdict_at_exact_ttl_still_counts() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    assert!(augur.confirm(pending_id, Verdict::Correct, at(300)).is_ok());
}

#[test]
fn superseding_request_discards_the_old_pending() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, first) = issue(&augur, 1, "WINGO", 0);
    // Stock WINGO cooldown is zero, so a second request goes straight through.
    let (_, _, second) = issue(&augur, 1, "WINGO", 1);

    assert_eq!(
        augur.confirm(first, Verdict::Correct, at(2)).unwrap_err(),
        AugurError::Session(SessionError::NotPending)
    );
    assert!(augur.confirm(second, Verdict::Correct, at(2)).is_ok());
}

#[test]
fn confirming_twice_finds_nothing_pending() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Correct, at(1)).unwrap();
    assert_eq!(
        augur
            .confirm(pending_id, Verdict::Correct, at(2))
            .unwrap_err(),
        AugurError::Session(SessionError::NotPending)
    );
}

// ── Outcome correction after a wrong prediction ───────────────────────────

#[test]
fn report_outcome_appends_the_observed_result() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(1)).unwrap();

    let updated = augur.report_outcome(1, "WINGO", l("Small"), at(2)).unwrap();
    assert_eq!(
        updated,
        labels("Small,Big,Big,Small,Big,Small,Small,Big,Small,Small")
    );
}

#[test]
fn report_outcome_is_refused_while_a_prediction_is_pending() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    issue(&augur, 1, "WINGO", 0);
    assert_eq!(
        augur
            .report_outcome(1, "WINGO", l("Small"), at(1))
            .unwrap_err(),
        AugurError::Session(SessionError::PredictionPending)
    );

    // Once the pending record ages out, the correction goes through.
    assert!(augur.report_outcome(1, "WINGO", l("Small"), at(301)).is_ok());
}

#[test]
fn report_outcome_validates_the_axis() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();
    assert!(matches!(
        augur
            .report_outcome(1, "WINGO", l("Big Odd"), at(0))
            .unwrap_err(),
        AugurError::Catalog(CatalogError::InvalidSequence { .. })
    ));
}

#[test]
fn seed_validates_the_axis() {
    let augur = engine_with_wingo_pattern();
    let mut mixed = labels(SEED);
    mixed[3] = l("Big Odd");
    assert!(matches!(
        augur.seed_history(1, "WINGO", mixed).unwrap_err(),
        AugurError::Catalog(CatalogError::InvalidSequence { .. })
    ));
}

// ── Logging and analytics ─────────────────────────────────────────────────

#[test]
fn correct_confirmations_reach_the_sink() {
    init_tracing();
    let sink = Arc::new(MemorySink::default());
    let augur = Augur::new(AugurConfig::default()).with_sink(sink.clone());
    augur
        .add_pattern("WINGO", labels("Small,Small,Big,Small"), l("Big"))
        .unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Correct, at(1)).unwrap();

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].app, "1win");
    assert_eq!(records[0].game, "WINGO");
    assert_eq!(records[0].outcome, l("Big"));
}

#[test]
fn wrong_confirmations_are_not_emitted() {
    init_tracing();
    let sink = Arc::new(MemorySink::default());
    let augur = Augur::new(AugurConfig::default()).with_sink(sink.clone());
    augur
        .add_pattern("WINGO", labels("Small,Small,Big,Small"), l("Big"))
        .unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(1)).unwrap();
    assert!(sink.records.lock().unwrap().is_empty());
}

#[test]
fn sink_failure_does_not_roll_back_history() {
    init_tracing();
    let sink = Arc::new(MemorySink::default());
    sink.fail.store(true, Ordering::SeqCst);
    let augur = Augur::new(AugurConfig::default()).with_sink(sink.clone());
    augur
        .add_pattern("WINGO", labels("Small,Small,Big,Small"), l("Big"))
        .unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    let resolved = augur.confirm(pending_id, Verdict::Correct, at(1)).unwrap();
    assert_eq!(resolved.verdict, Verdict::Correct);
    assert_eq!(
        augur.history(1, "WINGO").unwrap(),
        labels("Small,Big,Big,Small,Big,Small,Small,Big,Small,Big")
    );
}

#[test]
fn archive_tracks_hit_rate_per_user() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(1)).unwrap();

    // History unchanged, so the same pattern still matches.
    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 2);
    augur.confirm(pending_id, Verdict::Correct, at(3)).unwrap();

    let analytics = augur.user_analytics(1).unwrap();
    assert_eq!(analytics.total(), 2);
    assert_eq!(analytics.correct(), 1);
    assert!((analytics.hit_rate() - 0.5).abs() < f64::EPSILON);
    assert!(augur.user_analytics(2).is_none());
}

// ── Admin resets ──────────────────────────────────────────────────────────

#[test]
fn reset_history_discards_the_pending_prediction() {
    let augur = engine_with_wingo_pattern();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.reset_history(1, "WINGO").unwrap();

    assert_eq!(
        augur.confirm(pending_id, Verdict::Correct, at(1)).unwrap_err(),
        AugurError::Session(SessionError::NotPending)
    );
    assert_eq!(
        augur.history(1, "WINGO").unwrap_err(),
        AugurError::History(HistoryError::NotSeeded)
    );
    // The pair can be seeded afresh.
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();
}

#[test]
fn reset_cooldown_reopens_the_gate() {
    let augur = engine_with_wingo_pattern();
    augur.set_cooldown("WINGO", 600).unwrap();
    augur.seed_history(1, "WINGO", labels(SEED)).unwrap();

    let (_, _, pending_id) = issue(&augur, 1, "WINGO", 0);
    augur.confirm(pending_id, Verdict::Wrong, at(1)).unwrap();
    assert!(matches!(
        augur.request_prediction(&request(1, "WINGO", 2)).unwrap(),
        RequestOutcome::Cooldown { .. }
    ));

    augur.reset_cooldown(1, "WINGO").unwrap();
    issue(&augur, 1, "WINGO", 3);
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn pairs_run_concurrently_without_corruption() {
    use std::thread;

    init_tracing();
    let augur = Arc::new(Augur::new(AugurConfig::default()));
    augur
        .add_pattern("WINGO", labels("Small,Small,Big,Small"), l("Big"))
        .unwrap();
    for user in 0..4i64 {
        augur.seed_history(user, "WINGO", labels(SEED)).unwrap();
    }

    let mut handles = Vec::new();
    for user in 0..4i64 {
        let augur = Arc::clone(&augur);
        handles.push(thread::spawn(move || {
            for round in 0..50 {
                let (_, _, pending_id) = issue(&augur, user, "WINGO", round);
                // Wrong keeps the history (and thus the match) stable.
                augur
                    .confirm(pending_id, Verdict::Wrong, at(round))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for user in 0..4i64 {
        let analytics = augur.user_analytics(user).unwrap();
        assert_eq!(analytics.total(), 50);
        assert_eq!(augur.history(user, "WINGO").unwrap(), labels(SEED));
    }
}
