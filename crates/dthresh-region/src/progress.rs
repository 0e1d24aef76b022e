//! Progress reporting hook
//!
//! Long scans report their completed fraction (0.0 to 1.0) through a
//! [`ProgressObserver`]. Observing progress never changes results.

/// Receives fractional progress during a filter run.
pub trait ProgressObserver {
    /// Called with the completed fraction, non-decreasing, ending at `1.0`.
    fn report(&mut self, fraction: f32);
}

impl<F: FnMut(f32)> ProgressObserver for F {
    fn report(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Observer that ignores all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn report(&mut self, _fraction: f32) {}
}

/// Number of reports emitted per stage, at most.
const REPORT_STEPS: usize = 100;

/// Tracks work done within a `[start, end]` slice of the overall progress
/// range and forwards coarse-grained updates to an observer.
pub(crate) struct ProgressTicker<'a, P: ProgressObserver + ?Sized> {
    observer: &'a mut P,
    start: f32,
    span: f32,
    total: usize,
    done: usize,
    next_report: usize,
    step: usize,
}

impl<'a, P: ProgressObserver + ?Sized> ProgressTicker<'a, P> {
    pub(crate) fn new(observer: &'a mut P, start: f32, end: f32, total: usize) -> Self {
        let step = (total / REPORT_STEPS).max(1);
        Self {
            observer,
            start,
            span: end - start,
            total,
            done: 0,
            next_report: step,
            step,
        }
    }

    /// Record `n` more units of completed work.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.done = (self.done + n).min(self.total);
        if self.done >= self.next_report {
            let fraction = self.start + self.span * (self.done as f32 / self.total as f32);
            log::trace!("progress {:.3}", fraction);
            self.observer.report(fraction);
            self.next_report = self.done + self.step;
        }
    }

    /// Report the end of this stage.
    pub(crate) fn finish(self) {
        self.observer.report(self.start + self.span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_monotonic_and_bounded() {
        let mut seen = Vec::new();
        let mut observer = |f: f32| seen.push(f);
        let mut ticker = ProgressTicker::new(&mut observer, 0.5, 1.0, 1000);
        for _ in 0..1000 {
            ticker.advance(1);
        }
        ticker.finish();

        assert!(seen.len() <= REPORT_STEPS + 1);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|&f| (0.5..=1.0).contains(&f)));
        assert_eq!(seen.last().copied(), Some(1.0));
    }

    #[test]
    fn test_ticker_zero_total() {
        let mut seen = Vec::new();
        let mut observer = |f: f32| seen.push(f);
        let mut ticker = ProgressTicker::new(&mut observer, 0.0, 0.5, 0);
        ticker.advance(0);
        ticker.finish();
        assert_eq!(seen, vec![0.5]);
    }

    #[test]
    fn test_no_progress() {
        let mut observer = NoProgress;
        observer.report(0.3);
    }
}
