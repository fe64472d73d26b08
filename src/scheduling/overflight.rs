use super::clock::WallClock;
use crate::config::SimulationConfig;
use crate::constants::{MIN_ANGULAR_RATE, TWO_PI};
use crate::models::Satellite;
use crate::physics::orbital::OrbitalMechanics;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::Serialize;

/// Time window between two consecutive overflights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration: end - start,
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }

    pub fn report(&self) -> IntervalReport {
        IntervalReport {
            start: self.start.to_rfc3339(),
            end: self.end.to_rfc3339(),
            duration: self.formatted_duration(),
        }
    }
}

/// Display form of an [`Interval`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalReport {
    pub start: String,
    pub end: String,
    pub duration: String,
}

/// `HH:MM:SS`, floored to whole seconds. Hours are not wrapped.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

fn millis(ms: f64) -> Duration {
    Duration::milliseconds(ms.round() as i64)
}

/// Next `count` times the satellite's phase crosses zero, the first one at
/// or after `now`. `None` for satellites that are not turning.
pub fn next_crossings(
    satellite: &Satellite,
    now: DateTime<Utc>,
    count: usize,
) -> Option<Vec<DateTime<Utc>>> {
    let omega = satellite.angular_speed();
    let abs_omega = omega.abs();
    if !(abs_omega >= MIN_ANGULAR_RATE) {
        return None;
    }
    let period = millis(OrbitalMechanics::angular_period(omega)? * 1000.0);
    let phase = OrbitalMechanics::normalize_angle(satellite.true_anomaly_angle);
    let delta = if omega > 0.0 {
        (TWO_PI - phase) % TWO_PI
    } else {
        phase % TWO_PI
    };

    // Crossings past the representable date range are dropped
    let first = now.checked_add_signed(millis(delta / abs_omega * 1000.0))?;
    Some(
        std::iter::successors(Some(first), |t| t.checked_add_signed(period))
            .take(count)
            .collect(),
    )
}

/// Sorts crossings, collapses those within `tolerance` of the previously
/// kept one, and keeps the first `count` strictly after `now`. Missing
/// entries are padded with `padding` after the last one.
pub fn merge_crossings(
    mut crossings: Vec<DateTime<Utc>>,
    now: DateTime<Utc>,
    tolerance: Duration,
    padding: Duration,
    count: usize,
) -> Vec<DateTime<Utc>> {
    crossings.sort();

    let mut unique: Vec<DateTime<Utc>> = Vec::with_capacity(crossings.len());
    for t in crossings {
        match unique.last() {
            Some(last) if t - *last <= tolerance => {}
            _ => unique.push(t),
        }
    }

    let mut upcoming: Vec<DateTime<Utc>> =
        unique.into_iter().filter(|t| *t > now).take(count).collect();
    while upcoming.len() < count {
        let last = upcoming.last().copied().unwrap_or(now);
        match last.checked_add_signed(padding) {
            Some(t) if t > last => upcoming.push(t),
            _ => break,
        }
    }
    upcoming
}

/// Overflight schedule for the satellites at `now`. Pure in its inputs.
pub fn compute_next_free_intervals(
    satellites: &[Satellite],
    now: DateTime<Utc>,
    config: &SimulationConfig,
) -> Vec<Interval> {
    let crossings: Vec<DateTime<Utc>> = satellites
        .iter()
        .filter_map(|s| next_crossings(s, now, config.crossings_per_satellite))
        .flatten()
        .collect();

    let upcoming = merge_crossings(
        crossings,
        now,
        Duration::milliseconds(config.dedup_tolerance_ms),
        Duration::milliseconds(config.padding_ms),
        config.interval_count + 1,
    );
    debug!(
        "Computed overflights: {:?}",
        upcoming.iter().map(|t| t.to_rfc3339()).collect::<Vec<_>>()
    );

    let intervals: Vec<Interval> = upcoming
        .windows(2)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect();
    debug!("Next {} free intervals: {:?}", intervals.len(), intervals);
    intervals
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub generated_at: DateTime<Utc>,
    pub intervals: Vec<Interval>,
}

/// Recomputes the schedule from a wall clock, meant to run about once a second.
pub struct OverflightScheduler<C: WallClock> {
    clock: C,
}

impl<C: WallClock> OverflightScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn refresh(&self, satellites: &[Satellite], config: &SimulationConfig) -> Schedule {
        let now = self.clock.now();
        Schedule {
            generated_at: now,
            intervals: compute_next_free_intervals(satellites, now, config),
        }
    }
}
