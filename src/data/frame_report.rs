use std::time::Duration;
use crate::common::ObstacleDetection;

/// What a single frame produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The tensor did not match the declared shape; the frame was skipped and
    /// nothing is delivered downstream.
    NotReady,
    /// Decoding or suppression left no boxes.
    Empty,
    /// Surviving detections, highest confidence first.
    Detected(Vec<ObstacleDetection>),
}

impl FrameOutcome {
    pub fn is_ready(&self) -> bool {
        !matches!(self, FrameOutcome::NotReady)
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, FrameOutcome::Detected(_))
    }

    pub fn detections(&self) -> &[ObstacleDetection] {
        match self {
            FrameOutcome::Detected(xs) => xs.as_slice(),
            _ => &[],
        }
    }

    pub fn into_detections(self) -> Vec<ObstacleDetection> {
        match self {
            FrameOutcome::Detected(xs) => xs,
            _ => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.detections().len()
    }
}

/// Wall-clock time spent in each pipeline stage for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StageTimings {
    pub decode: Duration,
    pub nms: Duration,
    pub distance: Duration,
    pub total: Duration,
}

impl StageTimings {
    pub const STAGES: [&'static str; 4] = ["Decode", "NMS", "Distance", "Total"];
    /// Index of the whole-frame slot in [`as_array`](Self::as_array).
    pub const TOTAL: usize = 3;

    pub fn as_array(&self) -> [Duration; 4] {
        [self.decode, self.nms, self.distance, self.total]
    }
}

/// Delivered to a result sink once per processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub timings: StageTimings,
}

impl FrameReport {
    pub fn new(outcome: FrameOutcome, timings: StageTimings) -> Self {
        Self { outcome, timings }
    }
}
