//! Frequency sweeps and frequency-domain conversions.
//!
//! EIS spectra are sampled logarithmically in frequency. [`FrequencySweep`]
//! describes such a sampling as a start/stop pair plus a density in points
//! per decade, and materializes it as a geometrically spaced table.

use std::f64::consts::TAU;

/// Default sweep start frequency in Hz.
pub const DEFAULT_F_START: f64 = 1.0;
/// Default sweep stop frequency in Hz.
pub const DEFAULT_F_STOP: f64 = 1.0e6;
/// Default sweep density in points per decade.
pub const DEFAULT_PTS_PER_DECADE: usize = 30;

/// Angular frequency `ω = 2πf` for a frequency in Hz.
pub fn angular_frequency(frequency: f64) -> f64 {
    TAU * frequency
}

/// Frequency in Hz for an angular frequency `ω`.
pub fn frequency(angular_frequency: f64) -> f64 {
    angular_frequency / TAU
}

/// A logarithmic frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    /// Start frequency in Hz.
    pub start: f64,
    /// Stop frequency in Hz.
    pub stop: f64,
    /// Sampling density in points per decade.
    pub pts_per_decade: usize,
}

impl Default for FrequencySweep {
    fn default() -> Self {
        Self {
            start: DEFAULT_F_START,
            stop: DEFAULT_F_STOP,
            pts_per_decade: DEFAULT_PTS_PER_DECADE,
        }
    }
}

impl FrequencySweep {
    /// Create a sweep over `[start, stop]` Hz with the default density.
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            pts_per_decade: DEFAULT_PTS_PER_DECADE,
        }
    }

    /// Set the sampling density in points per decade.
    pub fn with_pts_per_decade(mut self, pts_per_decade: usize) -> Self {
        self.pts_per_decade = pts_per_decade;
        self
    }

    /// Number of sample points the sweep materializes to.
    ///
    /// One point per `1/pts_per_decade` decade, endpoints included, so a
    /// whole number of decades yields `decades * pts_per_decade + 1` points.
    /// Spans with no finite decade count (a zero or negative endpoint)
    /// collapse to a single point.
    pub fn point_count(&self) -> usize {
        let decades = self.stop.log10() - self.start.log10();
        let intervals = decades * self.pts_per_decade as f64;
        if !intervals.is_finite() {
            return 1;
        }
        (intervals.round() as usize).saturating_add(1)
    }

    /// Materialize the sweep as a geometrically spaced frequency table.
    ///
    /// Spacing is linear in log-frequency; both endpoints are exact.
    pub fn points(&self) -> Vec<f64> {
        let count = self.point_count();
        if count <= 1 {
            return vec![self.start];
        }
        let ln_start = self.start.ln();
        let ln_step = (self.stop.ln() - ln_start) / (count - 1) as f64;
        let mut points: Vec<f64> = (0..count)
            .map(|i| (ln_start + ln_step * i as f64).exp())
            .collect();
        points[0] = self.start;
        points[count - 1] = self.stop;
        points
    }
}
