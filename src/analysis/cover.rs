//! Continuous lens-cover monitoring.
//!
//! Separate from the per-sample darkness gate: this monitor watches a
//! live low-resolution luminance stream and maintains an advisory
//! "covered" indicator for the presentation layer. It never gates the
//! batch pipeline.

/// Default luminance threshold for the live cover indicator.
///
/// Tuned independently of the capture-time darkness threshold; slightly
/// higher, for better detection on noisy preview feeds.
pub const DEFAULT_COVER_THRESHOLD: f64 = 25.0;

/// Advisory indicator for whether the lens is currently covered.
#[derive(Debug, Clone)]
pub struct CoverMonitor {
    threshold: f64,
    covered: bool,
    last_mean: Option<f64>,
}

impl CoverMonitor {
    /// Creates a monitor with the given luminance threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            covered: false,
            last_mean: None,
        }
    }

    /// Feeds one low-resolution luminance plane (Y bytes) to the monitor.
    ///
    /// Returns the updated covered state.
    pub fn observe_plane(&mut self, luma: &[u8]) -> bool {
        let mean = if luma.is_empty() {
            0.0
        } else {
            luma.iter().map(|&y| y as f64).sum::<f64>() / luma.len() as f64
        };
        self.observe_mean(mean)
    }

    /// Feeds a precomputed mean luminance to the monitor.
    pub fn observe_mean(&mut self, mean: f64) -> bool {
        let covered = mean < self.threshold;
        if covered != self.covered {
            if covered {
                tracing::info!(mean, threshold = self.threshold, "lens covered");
            } else {
                tracing::info!(mean, threshold = self.threshold, "lens uncovered");
            }
        }
        self.covered = covered;
        self.last_mean = Some(mean);
        covered
    }

    /// Returns the current covered state.
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    /// Returns the most recently observed mean luminance.
    pub fn last_mean(&self) -> Option<f64> {
        self.last_mean
    }
}

impl Default for CoverMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_COVER_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uncovered() {
        let monitor = CoverMonitor::default();
        assert!(!monitor.is_covered());
        assert!(monitor.last_mean().is_none());
    }

    #[test]
    fn test_dark_plane_covers() {
        let mut monitor = CoverMonitor::default();
        assert!(monitor.observe_plane(&[3u8; 256]));
        assert!(monitor.is_covered());
    }

    #[test]
    fn test_bright_plane_uncovers() {
        let mut monitor = CoverMonitor::default();
        monitor.observe_plane(&[3u8; 256]);
        assert!(!monitor.observe_plane(&[200u8; 256]));
        assert!(!monitor.is_covered());
        assert_eq!(monitor.last_mean(), Some(200.0));
    }

    #[test]
    fn test_threshold_is_independent() {
        let mut strict = CoverMonitor::new(2.0);
        assert!(!strict.observe_plane(&[3u8; 64]));

        let mut lax = CoverMonitor::new(50.0);
        assert!(lax.observe_plane(&[30u8; 64]));
    }
}
