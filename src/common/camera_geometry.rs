use std::fmt;
use serde::{Deserialize, Serialize};

/// Pinhole camera parameters for the current session.
///
/// Focal length and sensor height are optional: their absence is a supported
/// state in which no distance estimates are produced.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraGeometry {
    pub focal_length_mm: Option<f32>,
    pub sensor_height_mm: Option<f32>,
    pub image_height_px: f32,
}

impl CameraGeometry {
    pub fn new(focal_length_mm: Option<f32>, sensor_height_mm: Option<f32>, image_height_px: f32) -> Self {
        Self {
            focal_length_mm,
            sensor_height_mm,
            image_height_px,
        }
    }

    /// Geometry for a camera that reports no optical metadata.
    pub fn unavailable(image_height_px: f32) -> Self {
        Self {
            focal_length_mm: None,
            sensor_height_mm: None,
            image_height_px,
        }
    }

    /// True when both optical parameters are known.
    pub fn is_available(&self) -> bool {
        self.focal_length_mm.is_some() && self.sensor_height_mm.is_some()
    }
}

impl fmt::Display for CameraGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_mm = |v: Option<f32>| v.map(|v| format!("{}mm", v)).unwrap_or_else(|| "unknown".to_string());
        write!(f, "Focal Length: {}\n\
        Sensor Height: {}\n\
        Image Height: {}px",
               fmt_mm(self.focal_length_mm), fmt_mm(self.sensor_height_mm), self.image_height_px)
    }
}
