use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::*;

const DELHI: Coordinate = Coordinate::new(28.613_9, 77.209);

/// What a scripted provider does on one call.
enum Step {
    Fix(Position),
    Fail(PositionError),
    Hang,
}

/// Replays `steps` in order and records the options of every call.
struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    calls: Arc<Mutex<Vec<PositionOptions>>>,
}

impl ScriptedProvider {
    fn new(steps: Vec<Step>) -> (Self, Arc<Mutex<Vec<PositionOptions>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            steps: Mutex::new(steps.into()),
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

impl PositionProvider for ScriptedProvider {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError> {
        self.calls.lock().unwrap().push(*options);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Fix(position)) => Ok(position),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Hang) => std::future::pending::<Result<Position, PositionError>>().await,
            None => panic!("provider called more times than scripted"),
        }
    }
}

fn fresh_fix(coordinate: Coordinate) -> Position {
    Position {
        coordinate,
        accuracy_m: Some(12.0),
        timestamp: Utc::now() + TimeDelta::seconds(1),
    }
}

fn fix_aged(coordinate: Coordinate, age: TimeDelta) -> Position {
    Position {
        coordinate,
        accuracy_m: Some(40.0),
        timestamp: Utc::now() - age,
    }
}

fn short_tiers() -> (PositionOptions, PositionOptions) {
    (
        PositionOptions {
            timeout: Duration::from_millis(50),
            ..PositionOptions::HIGH_ACCURACY
        },
        PositionOptions {
            timeout: Duration::from_millis(25),
            ..PositionOptions::LOW_ACCURACY
        },
    )
}

#[test]
fn default_tiers_match_documented_policy() {
    let high = PositionOptions::HIGH_ACCURACY;
    assert!(high.enable_high_accuracy);
    assert_eq!(high.timeout, Duration::from_millis(10_000));
    assert_eq!(high.maximum_age, Duration::from_millis(60_000));

    let low = PositionOptions::LOW_ACCURACY;
    assert!(!low.enable_high_accuracy);
    assert_eq!(low.timeout, Duration::from_millis(5_000));
    assert_eq!(low.maximum_age, Duration::ZERO);
}

#[test]
fn accepts_fix_within_maximum_age() {
    let now = Utc::now();
    let high = PositionOptions::HIGH_ACCURACY;
    assert!(high.accepts_fix(now - TimeDelta::seconds(30), now));
    assert!(!high.accepts_fix(now - TimeDelta::seconds(90), now));
}

#[test]
fn zero_maximum_age_rejects_any_cached_fix() {
    let now = Utc::now();
    let low = PositionOptions::LOW_ACCURACY;
    assert!(low.accepts_fix(now, now));
    assert!(!low.accepts_fix(now - TimeDelta::milliseconds(1), now));
}

#[tokio::test]
async fn first_tier_success_makes_one_call() {
    let (provider, calls) = ScriptedProvider::new(vec![Step::Fix(fresh_fix(DELHI))]);
    let locator = GeoLocator::new(provider);

    let coordinate = locator.acquire().await.expect("tier 1 should succeed");

    assert_eq!(coordinate, DELHI);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].enable_high_accuracy);
}

#[tokio::test]
async fn permission_denied_falls_back_to_low_accuracy() {
    let (provider, calls) = ScriptedProvider::new(vec![
        Step::Fail(PositionError::PermissionDenied),
        Step::Fix(fresh_fix(DELHI)),
    ]);
    let locator = GeoLocator::new(provider);

    let coordinate = locator.acquire().await.expect("tier 2 should succeed");

    assert_eq!(coordinate, DELHI);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], PositionOptions::LOW_ACCURACY);
}

#[tokio::test]
async fn hanging_provider_times_out_each_tier() {
    let (high, low) = short_tiers();
    let (provider, calls) = ScriptedProvider::new(vec![Step::Hang, Step::Hang]);
    let locator = GeoLocator::with_tiers(provider, high, low);

    let err = locator.acquire().await.expect_err("both tiers hang");

    assert_eq!(err.high_accuracy, PositionError::Timeout { timeout_ms: 50 });
    assert_eq!(err.low_accuracy, PositionError::Timeout { timeout_ms: 25 });
    assert_eq!(calls.lock().unwrap().len(), 2, "never a third attempt");
}

#[tokio::test]
async fn timeout_then_sensor_error_reports_both_failures() {
    let (high, low) = short_tiers();
    let (provider, _calls) = ScriptedProvider::new(vec![
        Step::Hang,
        Step::Fail(PositionError::Unavailable("no satellites".to_string())),
    ]);
    let locator = GeoLocator::with_tiers(provider, high, low);

    let err = locator.acquire().await.unwrap_err();

    assert!(matches!(err.high_accuracy, PositionError::Timeout { .. }));
    assert_eq!(
        err.low_accuracy,
        PositionError::Unavailable("no satellites".to_string())
    );
}

#[tokio::test]
async fn stale_cached_fix_is_rejected_in_both_tiers() {
    let (provider, calls) = ScriptedProvider::new(vec![
        Step::Fix(fix_aged(DELHI, TimeDelta::minutes(5))),
        Step::Fix(fix_aged(DELHI, TimeDelta::minutes(5))),
    ]);
    let locator = GeoLocator::new(provider);

    let err = locator.acquire().await.unwrap_err();

    assert!(matches!(err.high_accuracy, PositionError::Unavailable(_)));
    assert!(matches!(err.low_accuracy, PositionError::Unavailable(_)));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn recent_cached_fix_is_accepted_by_first_tier() {
    let (provider, calls) =
        ScriptedProvider::new(vec![Step::Fix(fix_aged(DELHI, TimeDelta::seconds(20)))]);
    let locator = GeoLocator::new(provider);

    assert_eq!(locator.acquire().await.unwrap(), DELHI);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn denied_provider_is_location_unavailable() {
    let locator = GeoLocator::new(DeniedPositionProvider);
    let err = locator.acquire().await.unwrap_err();
    assert_eq!(err.high_accuracy, PositionError::PermissionDenied);
    assert_eq!(err.low_accuracy, PositionError::PermissionDenied);
}

#[tokio::test]
async fn fixed_provider_returns_its_coordinate() {
    let locator = GeoLocator::new(FixedPositionProvider::new(DELHI));
    assert_eq!(locator.acquire().await.unwrap(), DELHI);
}
