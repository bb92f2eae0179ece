//! Options for building a detection pipeline.

use std::fmt;
use std::path::Path;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::{CameraGeometry, OutputShape};
use crate::data::ReferenceHeights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub output_shape: OutputShape,
    pub labels: Vec<String>,
    pub camera: CameraGeometry,
    pub reference_heights: ReferenceHeights,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.35,
            iou_threshold: 0.3,
            output_shape: OutputShape::default(),
            labels: vec![],
            camera: CameraGeometry::default(),
            reference_heights: ReferenceHeights::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse pipeline config")?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = x;
        self
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_output_shape(mut self, shape: OutputShape) -> Self {
        self.output_shape = shape;
        self
    }

    /// Sets the output shape from the dims reported by the inference runtime.
    pub fn with_output_dims(mut self, dims: &[usize]) -> Result<Self> {
        self.output_shape = OutputShape::from_dims(dims)?;
        Ok(self)
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|x| x.to_string()).collect();
        self
    }

    pub fn with_camera(mut self, camera: CameraGeometry) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_reference_heights(mut self, heights: ReferenceHeights) -> Self {
        self.reference_heights = heights;
        self
    }

    /// Checks the structural invariants the per-frame path relies on.
    pub fn validate(&self) -> Result<()> {
        let shape = &self.output_shape;
        ensure!(shape.num_classes >= 1, "Output shape declares no classes");
        ensure!(shape.num_elements >= 1, "Output shape declares no anchor elements");
        ensure!(
            shape.checked_len().is_some(),
            "Output shape {} classes x {} elements is too large",
            shape.num_classes, shape.num_elements
        );
        ensure!(
            self.labels.len() >= shape.num_classes,
            "Label table has {} entries but the model outputs {} classes",
            self.labels.len(), shape.num_classes
        );
        ensure!(
            self.confidence_threshold > 0. && self.confidence_threshold < 1.,
            "Confidence threshold {} must be in (0, 1)",
            self.confidence_threshold
        );
        ensure!(
            self.iou_threshold > 0. && self.iou_threshold < 1.,
            "IoU threshold {} must be in (0, 1)",
            self.iou_threshold
        );
        Ok(())
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output Shape: {:?}\n\
        Classes: {}\n\
        Confidence Threshold: {}\n\
        IoU Threshold: {}\n\
        Reference Heights: {} classes\n\
        {}",
               self.output_shape.dims(), self.labels.len(),
               self.confidence_threshold, self.iou_threshold,
               self.reference_heights.len(), self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PipelineConfig {
        PipelineConfig::new()
            .with_output_shape(OutputShape::new(2, 10))
            .with_labels(&["person", "car"])
    }

    #[test]
    fn builder_config_validates() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn short_label_table_is_rejected() {
        let config = valid().with_labels(&["person"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn thresholds_outside_open_unit_interval_are_rejected() {
        assert!(valid().with_confidence_threshold(0.0).validate().is_err());
        assert!(valid().with_confidence_threshold(1.0).validate().is_err());
        assert!(valid().with_iou_threshold(1.5).validate().is_err());
        assert!(valid().with_iou_threshold(f32::NAN).validate().is_err());
    }

    #[test]
    fn oversized_shape_is_rejected() {
        let config = PipelineConfig::new()
            .with_output_shape(OutputShape::new(1, usize::MAX / 2))
            .with_labels(&["person"]);
        assert!(config.validate().is_err());

        let config = PipelineConfig::from_json_str(&format!(
            r#"{{ "output_shape": {{ "num_classes": 1, "num_elements": {} }}, "labels": ["person"] }}"#,
            usize::MAX
        ))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn display_lists_camera_and_thresholds() {
        let text = valid()
            .with_camera(CameraGeometry::new(Some(4.0), None, 480.0))
            .to_string();
        assert!(text.contains("Output Shape: [1, 6, 10]"));
        assert!(text.contains("IoU Threshold: 0.3"));
        assert!(text.contains("Focal Length: 4mm"));
        assert!(text.contains("Sensor Height: unknown"));
    }

    #[test]
    fn unset_shape_is_rejected() {
        let config = PipelineConfig::new().with_labels(&["person"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_json_with_defaults() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "iou_threshold": 0.45,
                "output_shape": { "num_classes": 1, "num_elements": 8400 },
                "labels": ["person"],
                "camera": { "focal_length_mm": 4.0, "sensor_height_mm": null, "image_height_px": 640.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.confidence_threshold, 0.35);
        assert_eq!(config.iou_threshold, 0.45);
        assert_eq!(config.output_shape, OutputShape::new(1, 8400));
        assert_eq!(config.camera.focal_length_mm, Some(4.0));
        assert_eq!(config.camera.sensor_height_mm, None);
        assert_eq!(config.reference_heights.get("person"), Some(1700.0));
        assert!(config.validate().is_ok());
    }
}
