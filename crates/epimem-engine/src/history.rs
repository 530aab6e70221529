//! Sliding-window history of the epidemic signal, and the memory kernel
//! that turns it into the information index M.
//!
//! The history buffer is the explicit replacement for a delay-equation
//! primitive: the integrator appends one sample per step and the kernel
//! aggregates whatever lies inside the trailing memory window. During
//! warm-up (before a full window of history exists) the kernel simply
//! averages over the samples actually available.

use std::collections::VecDeque;

/// One recorded (time, signal) pair. The signal is the infected fraction
/// I/N at that time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub signal: f64,
}

/// Time-ordered samples covering at least the trailing memory window.
///
/// Owned by the integrator; the kernel only reads it. Samples older than
/// the window are discarded lazily on insertion.
#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    window: f64,
    samples: VecDeque<Sample>,
}

impl HistoryBuffer {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    /// Append a sample and drop everything that fell out of the window.
    /// Times must be strictly increasing; violating that is an internal
    /// contract breach, not bad input.
    pub fn record(&mut self, time: f64, signal: f64) {
        debug_assert!(
            self.samples.back().is_none_or(|last| time > last.time),
            "history samples must arrive in strictly increasing time order"
        );
        self.samples.push_back(Sample { time, signal });
        let oldest = time - self.window;
        while self.samples.front().is_some_and(|s| s.time < oldest) {
            self.samples.pop_front();
        }
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

/// Compute the information index M over the trailing window ending at
/// `now`.
///
/// Each in-window sample is weighted by `exp(-sharpness * (now - t))` and
/// the result is normalized by the weight sum, so `sharpness = 0` reduces
/// to a plain average of the window and larger values lean harder on the
/// recent past. Samples after `now` or older than the window are ignored.
/// An empty (or fully out-of-window) history yields M = 0.
pub fn information_index(history: &HistoryBuffer, now: f64, sharpness: f64) -> f64 {
    let oldest = now - history.window();
    let mut weighted = 0.0;
    let mut norm = 0.0;
    for sample in history.samples() {
        if sample.time > now || sample.time < oldest {
            continue;
        }
        let weight = (-sharpness * (now - sample.time)).exp();
        weighted += weight * sample.signal;
        norm += weight;
    }
    if norm > 0.0 {
        weighted / norm
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(window: f64, samples: &[(f64, f64)]) -> HistoryBuffer {
        let mut history = HistoryBuffer::new(window);
        for &(time, signal) in samples {
            history.record(time, signal);
        }
        history
    }

    #[test]
    fn empty_history_yields_zero() {
        let history = HistoryBuffer::new(10.0);
        assert_eq!(information_index(&history, 0.0, 0.5), 0.0);
    }

    #[test]
    fn single_sample_returns_its_signal() {
        let history = buffer_with(10.0, &[(1.0, 0.25)]);
        let m = information_index(&history, 1.0, 2.0);
        assert!((m - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_sharpness_is_a_plain_average() {
        let history = buffer_with(10.0, &[(1.0, 0.1), (2.0, 0.3), (3.0, 0.5)]);
        let m = information_index(&history, 3.0, 0.0);
        assert!((m - 0.3).abs() < 1e-12);
    }

    #[test]
    fn samples_past_now_are_excluded() {
        // Warm-up contract: querying mid-history must not look ahead.
        let history = buffer_with(10.0, &[(0.0, 0.1), (1.0, 0.1), (2.0, 0.9)]);
        let m = information_index(&history, 1.5, 0.0);
        assert!((m - 0.1).abs() < 1e-12);
    }

    #[test]
    fn samples_older_than_the_window_are_excluded() {
        let mut history = HistoryBuffer::new(100.0);
        history.record(0.0, 0.9);
        history.record(5.0, 0.1);
        // A window of 2 at t = 5 only reaches back to t = 3.
        let narrow = buffer_with(2.0, &[(0.0, 0.9), (5.0, 0.1)]);
        let m = information_index(&narrow, 5.0, 0.0);
        assert!((m - 0.1).abs() < 1e-12);
        // The wide buffer still sees both.
        let m_wide = information_index(&history, 5.0, 0.0);
        assert!((m_wide - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sharper_weighting_raises_the_index_after_a_recent_spike() {
        let samples: Vec<(f64, f64)> = (0..20)
            .map(|i| {
                let signal = if i >= 18 { 0.8 } else { 0.05 };
                (i as f64, signal)
            })
            .collect();
        let history = buffer_with(30.0, &samples);
        let flat = information_index(&history, 19.0, 0.0);
        let sharp = information_index(&history, 19.0, 2.0);
        assert!(sharp > flat);
    }

    #[test]
    fn record_trims_beyond_the_window() {
        let mut history = HistoryBuffer::new(3.0);
        for i in 0..10 {
            history.record(i as f64, 0.1);
        }
        // Window [6, 9] plus its left edge.
        assert_eq!(history.len(), 4);
        assert!(history.samples().all(|s| s.time >= 6.0));
    }
}
