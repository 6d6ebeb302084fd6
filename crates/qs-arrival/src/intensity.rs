//! Arrival-rate functions: `IntensityFunction`, `ConstantIntensity`, and
//! `PiecewiseIntensity`.
//!
//! # Rate model
//!
//! An intensity maps `(time_of_day, day)` to an instantaneous arrival rate in
//! customers per hour.  Alongside the lookup it reports a finite set of
//! representative rates; the thinning generator takes their maximum as the
//! dominating rate `h`.  The function itself does not promise that `h` is a
//! global bound, which is why [`ThinningProcess`][crate::ThinningProcess]
//! validates both up front and at every candidate it evaluates.

use std::ops::RangeInclusive;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Time- and day-dependent arrival rate.
///
/// # Contract
///
/// - Must be deterministic: the same `(time_of_day, day)` always yields the
///   same rate.
/// - Should return a non-negative rate.
/// - Implementations must be `Send + Sync` (shared across Rayon threads).
pub trait IntensityFunction: Send + Sync {
    /// Instantaneous arrival rate at `time_of_day` on `day` (1-based).
    fn intensity(&self, time_of_day: f64, day: u32) -> f64;

    /// Representative rate values from which the caller derives a bound.
    fn supremum_candidates(&self) -> Vec<f64>;
}

// ── ConstantIntensity ─────────────────────────────────────────────────────────

/// A homogeneous rate; its own supremum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantIntensity(pub f64);

impl IntensityFunction for ConstantIntensity {
    #[inline]
    fn intensity(&self, _time_of_day: f64, _day: u32) -> f64 {
        self.0
    }

    fn supremum_candidates(&self) -> Vec<f64> {
        vec![self.0]
    }
}

// ── PiecewiseIntensity ────────────────────────────────────────────────────────

/// One constant-rate window `[start, end)` of a [`PiecewiseIntensity`].
#[derive(Clone, Debug, PartialEq)]
pub struct RateSegment {
    pub start: f64,
    pub end:   f64,
    pub rate:  f64,
    /// Days on which the segment applies; `None` means every day.
    pub days:  Option<RangeInclusive<u32>>,
}

impl RateSegment {
    /// A segment active on every day.
    pub fn new(start: f64, end: f64, rate: f64) -> Self {
        Self { start, end, rate, days: None }
    }

    /// Restrict the segment to an inclusive day range.
    pub fn on_days(mut self, days: RangeInclusive<u32>) -> Self {
        self.days = Some(days);
        self
    }

    #[inline]
    fn covers(&self, time_of_day: f64, day: u32) -> bool {
        self.start <= time_of_day
            && time_of_day < self.end
            && self.days.as_ref().is_none_or(|d| d.contains(&day))
    }
}

/// A deterministic piecewise-constant lookup table.
///
/// Segments are checked in insertion order and the first one covering
/// `(time_of_day, day)` supplies the rate; otherwise `base_rate` applies.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseIntensity {
    base_rate: f64,
    segments:  Vec<RateSegment>,
}

impl PiecewiseIntensity {
    pub fn new(base_rate: f64) -> Self {
        Self { base_rate, segments: Vec::new() }
    }

    /// Append a segment (builder style).
    pub fn segment(mut self, segment: RateSegment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn segments(&self) -> &[RateSegment] {
        &self.segments
    }
}

impl IntensityFunction for PiecewiseIntensity {
    fn intensity(&self, time_of_day: f64, day: u32) -> f64 {
        self.segments
            .iter()
            .find(|s| s.covers(time_of_day, day))
            .map_or(self.base_rate, |s| s.rate)
    }

    fn supremum_candidates(&self) -> Vec<f64> {
        std::iter::once(self.base_rate)
            .chain(self.segments.iter().map(|s| s.rate))
            .collect()
    }
}
