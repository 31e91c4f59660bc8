use std::time::Duration;

/// Averages over one reporting interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub fps: f32,
    pub avg_frame_ms: f32,
}

/// Accumulates frame deltas and emits a [`FrameReport`] once per interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    accumulated: Duration,
    frames: u32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            accumulated: Duration::ZERO,
            frames: 0,
        }
    }

    /// Records one frame of `dt` seconds. Returns a report when the interval
    /// has elapsed, then starts a new interval.
    pub fn record(&mut self, dt: f32) -> Option<FrameReport> {
        self.accumulated += Duration::from_secs_f32(dt.max(0.0));
        self.frames += 1;

        if self.accumulated < self.interval {
            return None;
        }

        let secs = self.accumulated.as_secs_f32();
        let report = FrameReport {
            frames: self.frames,
            fps: self.frames as f32 / secs,
            avg_frame_ms: secs * 1000.0 / self.frames as f32,
        };

        self.accumulated = Duration::ZERO;
        self.frames = 0;

        Some(report)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_before_interval() {
        let mut s = FrameStats::default();
        for _ in 0..10 {
            assert!(s.record(0.016).is_none());
        }
    }

    #[test]
    fn reports_average_after_interval() {
        let mut s = FrameStats::new(Duration::from_millis(95));
        let mut report = None;
        for _ in 0..10 {
            report = report.or(s.record(0.01));
        }
        let r = report.expect("interval elapsed");
        assert_eq!(r.frames, 10);
        assert!((r.fps - 100.0).abs() < 0.5, "fps {}", r.fps);
        assert!((r.avg_frame_ms - 10.0).abs() < 0.05);
    }

    #[test]
    fn restarts_after_report() {
        let mut s = FrameStats::new(Duration::from_millis(20));
        assert!(s.record(0.03).is_some());
        assert!(s.record(0.005).is_none());
    }
}
