use crossbeam_channel::{Receiver, Sender};
use crate::data::{FrameReport, ResultSink};

/// Detector side of the channel pair: receives raw output tensors and sends
/// frame reports.
#[derive(Debug)]
pub struct DetectionState {
    pub tensor_rx: Receiver<Box<Vec<f32>>>,
    pub report_tx: Sender<FrameReport>,
}

/// Caller side of the channel pair.
#[derive(Debug)]
pub struct SendState {
    pub tensor_tx: Sender<Box<Vec<f32>>>,
    pub report_rx: Receiver<FrameReport>,
}

/// Creates the connected detector/caller channel pair.
///
/// Both channels are unbounded so neither side blocks on the other.
pub fn detection_channels() -> (DetectionState, SendState) {
    let (tensor_tx, tensor_rx) = crossbeam_channel::unbounded();
    let (report_tx, report_rx) = crossbeam_channel::unbounded();
    (
        DetectionState { tensor_rx, report_tx },
        SendState { tensor_tx, report_rx },
    )
}

/// Result sink that forwards reports over a crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    report_tx: Sender<FrameReport>,
}

impl ChannelSink {
    pub fn new(report_tx: Sender<FrameReport>) -> Self {
        Self { report_tx }
    }

    /// An unbounded sink and the receiver for its reports.
    pub fn unbounded() -> (Self, Receiver<FrameReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl ResultSink for ChannelSink {
    fn deliver(&mut self, report: FrameReport) {
        if let Err(err) = self.report_tx.send(report) {
            log::warn!("obstacle_detect: Report receiver disconnected, dropping frame with {} detections", err.0.outcome.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FrameOutcome, StageTimings};

    #[test]
    fn channel_sink_forwards_reports() {
        let (mut sink, rx) = ChannelSink::unbounded();
        sink.deliver(FrameReport::new(FrameOutcome::Empty, StageTimings::default()));
        let report = rx.try_recv().unwrap();
        assert_eq!(report.outcome, FrameOutcome::Empty);
    }

    #[test]
    fn disconnected_receiver_does_not_panic() {
        let (mut sink, rx) = ChannelSink::unbounded();
        drop(rx);
        sink.deliver(FrameReport::new(FrameOutcome::Empty, StageTimings::default()));
    }
}
