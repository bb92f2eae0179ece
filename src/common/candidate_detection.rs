use serde::{Deserialize, Serialize};
use crate::common::ObstacleBox;
use crate::detection_runners::nms::Nms;

/// One decoded, range-checked prediction from a single anchor element.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct CandidateDetection {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: ObstacleBox,
}

impl Nms for CandidateDetection {
    /// Computes the intersection over union (IoU) between this bounding box and another.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.iou(&other.bbox)
    }

    /// Returns the confidence score of the bounding box.
    fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl CandidateDetection {
    pub fn new(class_id: usize, label: &str, confidence: f32, bbox: ObstacleBox) -> Self {
        Self {
            class_id,
            label: label.to_string(),
            confidence,
            bbox,
        }
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)` and calculates width and height.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = ObstacleBox::default().with_x1y1_x2y2(x1, y1, x2, y2);
        self
    }

    /// Sets the confidence score of the candidate.
    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    /// Sets the class ID of the candidate.
    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Normalized width of the box.
    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    /// Normalized height of the box.
    pub fn height(&self) -> f32 {
        self.bbox.height()
    }
}
