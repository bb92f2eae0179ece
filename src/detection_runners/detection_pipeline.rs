use std::time::Instant;
use anyhow::Result;
use crate::common::{ObstacleDetection, OutputShape, PipelineConfig, CameraGeometry};
use crate::data::{ChannelSink, DetectionState, FrameOutcome, FrameReport, ReferenceHeights, ResultSink, StageTimings};
use crate::detection_runners::{distance_estimator, nms, tensor_decoder};
use crate::utils;

/// Per-frame post-processing: decode, suppress, estimate distances.
///
/// Immutable once built; every frame is processed independently.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    pub(crate) shape: OutputShape,
    pub(crate) confidence_threshold: f32,
    pub(crate) iou_threshold: f32,
    pub(crate) labels: Vec<String>,
    pub(crate) camera: CameraGeometry,
    pub(crate) heights: ReferenceHeights,
}

impl DetectionPipeline {
    /// Builds the pipeline, failing on structurally invalid configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        if !config.camera.is_available() {
            log::info!("Camera focal length or sensor height unknown, distances will not be estimated");
        }

        Ok(Self {
            shape: config.output_shape,
            confidence_threshold: config.confidence_threshold,
            iou_threshold: config.iou_threshold,
            labels: config.labels,
            camera: config.camera,
            heights: config.reference_heights,
        })
    }

    pub fn shape(&self) -> &OutputShape {
        &self.shape
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Runs one frame through decode, NMS and distance estimation.
    pub fn detect(&self, tensor: &[f32]) -> FrameOutcome {
        self.detect_timed(tensor).0
    }

    /// Like [`detect`](Self::detect), also reporting how long each stage took.
    pub fn detect_timed(&self, tensor: &[f32]) -> (FrameOutcome, StageTimings) {
        let detect_time = Instant::now();
        let mut timings = StageTimings::default();
        let mut elapsed = detect_time.elapsed();

        let candidates = match tensor_decoder::decode(tensor, &self.shape, self.confidence_threshold, &self.labels) {
            Some(candidates) => candidates,
            None => return (FrameOutcome::NotReady, timings),
        };
        timings.decode = detect_time.elapsed() - elapsed;
        elapsed = utils::trace("Decode", detect_time, elapsed);

        if candidates.is_empty() {
            timings.total = detect_time.elapsed();
            return (FrameOutcome::Empty, timings);
        }

        let survivors = nms::suppress(candidates, self.iou_threshold);
        timings.nms = detect_time.elapsed() - elapsed;
        elapsed = utils::trace("NMS", detect_time, elapsed);

        let detections: Vec<ObstacleDetection> = survivors
            .into_iter()
            .map(|candidate| {
                let distance = distance_estimator::estimate_for(&candidate, &self.camera, &self.heights);
                ObstacleDetection::new(candidate, distance)
            })
            .collect();
        timings.distance = detect_time.elapsed() - elapsed;
        utils::trace("Distance", detect_time, elapsed);

        timings.total = detect_time.elapsed();
        log::debug!("Detected {} obstacles in {:.2?}", detections.len(), timings.total);

        (FrameOutcome::Detected(detections), timings)
    }

    /// Processes one frame and delivers its report to `sink`.
    ///
    /// A not-ready frame delivers nothing and returns `None`; otherwise the
    /// number of delivered detections is returned.
    pub fn process<S: ResultSink + ?Sized>(&self, tensor: &[f32], sink: &mut S) -> Option<usize> {
        let (outcome, timings) = self.detect_timed(tensor);
        if !outcome.is_ready() {
            return None;
        }
        let count = outcome.len();
        sink.deliver(FrameReport::new(outcome, timings));
        Some(count)
    }

    /// Processes tensors from `state` one at a time until the sending side
    /// disconnects. Returns the number of frames that produced a report.
    pub fn run_loop(&self, state: DetectionState) -> usize {
        let mut sink = ChannelSink::new(state.report_tx);
        let mut reported = 0;

        // MESSAGE LOOP STARTS HERE
        while let Ok(tensor) = state.tensor_rx.recv() {
            if self.process(&tensor, &mut sink).is_some() {
                reported += 1;
            }
        }

        log::info!("obstacle_detect: Tensor sender disconnected after {} reported frames", reported);
        reported
    }
}
