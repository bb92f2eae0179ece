use crate::data::{FrameReport, TimeCalc};

/// Downstream consumer of per-frame reports.
///
/// Implementations must return promptly: the next frame is not processed
/// until `deliver` returns.
pub trait ResultSink {
    fn deliver(&mut self, report: FrameReport);
}

impl<F> ResultSink for F
where
    F: FnMut(FrameReport),
{
    fn deliver(&mut self, report: FrameReport) {
        self(report)
    }
}

/// Records stage timings of every report before handing it to `inner`.
#[derive(Debug, Default)]
pub struct ProfiledSink<S> {
    inner: S,
    times: TimeCalc,
}

impl<S: ResultSink> ProfiledSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            times: TimeCalc::default(),
        }
    }

    pub fn times(&self) -> &TimeCalc {
        &self.times
    }
}

impl<S: ResultSink> ResultSink for ProfiledSink<S> {
    fn deliver(&mut self, report: FrameReport) {
        self.times.record(&report.timings);
        self.inner.deliver(report);
    }
}
