use std::time::Duration;
use crate::data::StageTimings;

/// Accumulates per-stage durations over many frames.
#[derive(Debug, Default)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    /// Accumulated whole-frame time across all recorded frames.
    pub fn total(&self) -> Duration {
        self.duration
            .get(StageTimings::TOTAL)
            .copied()
            .unwrap_or_default()
    }

    /// Number of complete samples, i.e. frames when fed through `record`.
    pub fn n(&self) -> usize {
        if self.duration.is_empty() {
            return 0;
        }
        self.n / self.duration.len()
    }

    /// Average whole-frame time.
    pub fn avg(&self) -> Duration {
        self.avg_i(StageTimings::TOTAL).unwrap_or_default()
    }

    pub fn avg_i(&self, i: usize) -> Option<Duration> {
        let n = self.n();
        if n == 0 {
            return None;
        }
        self.duration.get(i).map(|d| *d / n as u32)
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                if i >= self.duration.len() {
                    self.duration.push(x)
                }
            }
        }
        self.n += 1;
    }

    /// Adds one frame's stage timings.
    pub fn record(&mut self, timings: &StageTimings) {
        for (i, d) in timings.as_array().into_iter().enumerate() {
            self.add_or_push(i, d);
        }
    }

    pub fn clear(&mut self) {
        self.n = Default::default();
        self.duration = Default::default();
    }

    pub fn summary(&self) -> String {
        StageTimings::STAGES
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}: {:.2?}", name, self.avg_i(i).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_stage_timings_per_frame() {
        let mut t = TimeCalc::default();
        assert_eq!(t.n(), 0);
        assert_eq!(t.avg(), Duration::ZERO);
        assert_eq!(t.avg_i(0), None);

        t.record(&StageTimings {
            decode: Duration::from_micros(100),
            nms: Duration::from_micros(20),
            distance: Duration::from_micros(2),
            total: Duration::from_micros(130),
        });
        t.record(&StageTimings {
            decode: Duration::from_micros(300),
            nms: Duration::from_micros(40),
            distance: Duration::from_micros(4),
            total: Duration::from_micros(350),
        });

        assert_eq!(t.n(), 2);
        assert_eq!(t.avg_i(0), Some(Duration::from_micros(200)));
        assert_eq!(t.avg_i(1), Some(Duration::from_micros(30)));
        assert_eq!(t.avg_i(StageTimings::TOTAL), Some(Duration::from_micros(240)));
        assert_eq!(t.avg_i(4), None);

        assert_eq!(t.total(), Duration::from_micros(480));
        assert_eq!(t.avg(), Duration::from_micros(240));

        t.clear();
        assert_eq!(t.n(), 0);
        assert_eq!(t.total(), Duration::ZERO);
        assert_eq!(t.avg(), Duration::ZERO);
    }

    #[test]
    fn summary_lists_every_stage() {
        let mut t = TimeCalc::default();
        t.record(&StageTimings {
            decode: Duration::from_millis(2),
            nms: Duration::from_millis(1),
            distance: Duration::ZERO,
            total: Duration::from_millis(3),
        });

        let summary = t.summary();
        for stage in StageTimings::STAGES {
            assert!(summary.contains(stage), "{} missing from {}", stage, summary);
        }
        assert!(summary.contains("Total: 3.00ms"));
    }
}
