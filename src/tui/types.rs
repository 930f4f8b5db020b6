//! TUI-specific types

use smallvec::SmallVec;

use super::constants::chart;

/// Stack-allocated point vector sized for the chart history
pub type PointVec = SmallVec<[(f64, f64); 64]>;

/// Bounded history of mean-rate samples for the request chart
///
/// One sample is recorded per redraw tick (4 Hz), so a full history spans
/// the chart's 15-second window.
#[derive(Debug, Clone, Default)]
pub struct RateHistory {
    samples: SmallVec<[f64; 64]>,
}

impl RateHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample, dropping the oldest when the window is full
    pub fn push(&mut self, rate: f64) {
        if self.samples.len() >= chart::HISTORY_POINTS {
            self.samples.remove(0);
        }
        self.samples.push(rate);
    }

    /// Number of samples held
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest sample in the window (0 when empty)
    #[must_use]
    pub fn max_rate(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Chart points, x = sample index within the window
    #[must_use]
    pub fn points(&self) -> PointVec {
        self.samples
            .iter()
            .enumerate()
            .map(|(idx, rate)| (idx as f64, *rate))
            .collect()
    }
}
