mod utils;
pub mod common;
pub mod data;
pub mod detection_runners;

use std::time::Instant;
use crate::common::PipelineConfig;
use crate::data::FrameOutcome;
use crate::detection_runners::DetectionPipeline;

pub fn init_pipeline(config: PipelineConfig) -> anyhow::Result<DetectionPipeline> {
    log::info!("Initializing obstacle detection pipeline\n{}", config);
    DetectionPipeline::new(config)
}

pub fn run_detection(pipeline: &DetectionPipeline, tensor: &[f32]) -> FrameOutcome {
    let now = Instant::now();

    let outcome = pipeline.detect(tensor);

    log::debug!("Processing time: {:?}", now.elapsed());

    outcome
}
