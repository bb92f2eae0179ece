use serde::{Deserialize, Serialize};
use crate::common::{CandidateDetection, ObstacleBox};

/// A surviving detection with its estimated distance from the camera.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ObstacleDetection {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: ObstacleBox,
    /// Distance in meters. `None` when no estimate could be made.
    pub distance: Option<f32>,
}

impl ObstacleDetection {
    pub fn new(candidate: CandidateDetection, distance: Option<f32>) -> Self {
        Self {
            class_id: candidate.class_id,
            label: candidate.label,
            confidence: candidate.confidence,
            bbox: candidate.bbox,
            distance,
        }
    }
}
