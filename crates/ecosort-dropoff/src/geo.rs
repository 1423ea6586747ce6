//! Two-tier device location acquisition.
//!
//! Tier 1 asks for a high-accuracy fix and tolerates a cached fix up to a
//! minute old. Any tier 1 failure falls through to tier 2: low accuracy,
//! shorter timeout, no cached fix. There is never a third attempt.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use ecosort_core::Coordinate;

use crate::error::{LocationUnavailable, PositionError};

/// Options for one position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the request accepts. Zero demands a fresh fix.
    pub maximum_age: Duration,
}

impl PositionOptions {
    pub const HIGH_ACCURACY: Self = Self {
        enable_high_accuracy: true,
        timeout: Duration::from_millis(10_000),
        maximum_age: Duration::from_millis(60_000),
    };

    pub const LOW_ACCURACY: Self = Self {
        enable_high_accuracy: false,
        timeout: Duration::from_millis(5_000),
        maximum_age: Duration::ZERO,
    };

    /// Whether a fix taken at `fix_time` satisfies `maximum_age` for a
    /// request issued at `requested_at`.
    #[must_use]
    pub fn accepts_fix(&self, fix_time: DateTime<Utc>, requested_at: DateTime<Utc>) -> bool {
        let tolerance = TimeDelta::from_std(self.maximum_age).unwrap_or(TimeDelta::MAX);
        requested_at
            .checked_sub_signed(tolerance)
            .is_none_or(|oldest| fix_time >= oldest)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// A fix reported by a position provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coordinate: Coordinate,
    /// Horizontal accuracy radius in meters, when the sensor reports one.
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Source of device positions (OS location service, fixed coordinates, ...).
///
/// Implementations may prompt for permission on first use. The locator
/// enforces `options.timeout` itself, so a provider that never resolves is
/// reported as [`PositionError::Timeout`].
pub trait PositionProvider {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, PositionError>>;
}

/// Provider that always reports the same coordinate as a fresh fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionProvider {
    coordinate: Coordinate,
}

impl FixedPositionProvider {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl PositionProvider for FixedPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, PositionError> {
        Ok(Position {
            coordinate: self.coordinate,
            accuracy_m: None,
            timestamp: Utc::now(),
        })
    }
}

/// Provider for a device where location permission was refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPositionProvider;

impl PositionProvider for DeniedPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, PositionError> {
        Err(PositionError::PermissionDenied)
    }
}

/// Stateless two-tier locator over a [`PositionProvider`].
#[derive(Debug, Clone)]
pub struct GeoLocator<P> {
    provider: P,
    high_accuracy: PositionOptions,
    low_accuracy: PositionOptions,
}

impl<P: PositionProvider> GeoLocator<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_tiers(
            provider,
            PositionOptions::HIGH_ACCURACY,
            PositionOptions::LOW_ACCURACY,
        )
    }

    /// Locator with custom tier options (for tests with short timeouts).
    #[must_use]
    pub fn with_tiers(
        provider: P,
        high_accuracy: PositionOptions,
        low_accuracy: PositionOptions,
    ) -> Self {
        Self {
            provider,
            high_accuracy,
            low_accuracy,
        }
    }

    /// Acquire the current coordinate, falling back once to low accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`LocationUnavailable`] with both tier failures when neither
    /// tier produced an acceptable fix.
    pub async fn acquire(&self) -> Result<Coordinate, LocationUnavailable> {
        let high_accuracy = match self.attempt(&self.high_accuracy).await {
            Ok(position) => return Ok(position.coordinate),
            Err(err) => err,
        };
        tracing::debug!(
            error = %high_accuracy,
            "high-accuracy fix failed; retrying with low accuracy"
        );

        match self.attempt(&self.low_accuracy).await {
            Ok(position) => Ok(position.coordinate),
            Err(low_accuracy) => Err(LocationUnavailable {
                high_accuracy,
                low_accuracy,
            }),
        }
    }

    async fn attempt(&self, options: &PositionOptions) -> Result<Position, PositionError> {
        let requested_at = Utc::now();
        let position =
            match tokio::time::timeout(options.timeout, self.provider.current_position(options))
                .await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(PositionError::Timeout {
                        timeout_ms: options.timeout_ms(),
                    })
                }
            };

        if !options.accepts_fix(position.timestamp, requested_at) {
            return Err(PositionError::Unavailable(format!(
                "cached fix from {} exceeds maximum age of {} ms",
                position.timestamp.to_rfc3339(),
                options.maximum_age.as_millis()
            )));
        }

        tracing::debug!(
            high_accuracy = options.enable_high_accuracy,
            accuracy_m = position.accuracy_m,
            fix_time = %position.timestamp.to_rfc3339(),
            "position fix accepted"
        );
        Ok(position)
    }
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
