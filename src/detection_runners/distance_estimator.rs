use crate::common::{CameraGeometry, CandidateDetection};
use crate::data::ReferenceHeights;

const MM_PER_METER: f32 = 1000.0;

/// Pinhole-camera distance (meters) to an object of class `label` that spans
/// `object_height_px` image rows.
///
/// `distance = real_height * focal_length * image_height / (object_height * sensor_height)`
///
/// Returns `None` when the camera lacks focal length or sensor height, when the
/// object or sensor height is not positive, or when `label` has no reference height.
pub fn estimate_distance(
    label: &str,
    object_height_px: f32,
    camera: &CameraGeometry,
    heights: &ReferenceHeights,
) -> Option<f32> {
    let focal_length_mm = camera.focal_length_mm?;
    let sensor_height_mm = camera.sensor_height_mm?;
    if !(object_height_px > 0.) || !(sensor_height_mm > 0.) {
        return None;
    }
    let real_height_mm = heights.get(label)?;

    let distance_mm = (real_height_mm * focal_length_mm * camera.image_height_px)
        / (object_height_px * sensor_height_mm);

    distance_mm
        .is_finite()
        .then_some(distance_mm / MM_PER_METER)
}

/// Estimates the distance of a decoded candidate, scaling its normalized box
/// height to image pixels.
pub fn estimate_for(
    candidate: &CandidateDetection,
    camera: &CameraGeometry,
    heights: &ReferenceHeights,
) -> Option<f32> {
    let object_height_px = candidate.height() * camera.image_height_px;
    estimate_distance(&candidate.label, object_height_px, camera, heights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> CameraGeometry {
        CameraGeometry::new(Some(4.0), Some(3.0), 480.0)
    }

    #[test]
    fn similar_triangles() {
        // 1700 * 4 * 480 / (120 * 3) = 9066.67 mm
        let d = estimate_distance("person", 120.0, &camera(), &ReferenceHeights::default()).unwrap();
        assert_relative_eq!(d, 9.066_667, epsilon = 1e-4);
    }

    #[test]
    fn halving_pixel_height_doubles_distance() {
        let heights = ReferenceHeights::default();
        let near = estimate_distance("car", 200.0, &camera(), &heights).unwrap();
        let far = estimate_distance("car", 100.0, &camera(), &heights).unwrap();
        assert_relative_eq!(far, near * 2.0, epsilon = 1e-4);
    }

    #[test]
    fn missing_camera_parameters_give_no_estimate() {
        let heights = ReferenceHeights::default();
        let no_focal = CameraGeometry::new(None, Some(3.0), 480.0);
        let no_sensor = CameraGeometry::new(Some(4.0), None, 480.0);
        assert_eq!(estimate_distance("person", 120.0, &no_focal, &heights), None);
        assert_eq!(estimate_distance("person", 120.0, &no_sensor, &heights), None);
        assert_eq!(estimate_distance("person", 120.0, &CameraGeometry::unavailable(480.0), &heights), None);
    }

    #[test]
    fn degenerate_heights_give_no_estimate() {
        let heights = ReferenceHeights::default();
        assert_eq!(estimate_distance("person", 0.0, &camera(), &heights), None);
        assert_eq!(estimate_distance("person", -3.0, &camera(), &heights), None);
        assert_eq!(estimate_distance("person", f32::NAN, &camera(), &heights), None);

        let zero_sensor = CameraGeometry::new(Some(4.0), Some(0.0), 480.0);
        assert_eq!(estimate_distance("person", 120.0, &zero_sensor, &heights), None);
    }

    #[test]
    fn unknown_class_gives_no_estimate() {
        assert_eq!(estimate_distance("kite", 120.0, &camera(), &ReferenceHeights::default()), None);
    }

    #[test]
    fn candidate_height_is_scaled_to_pixels() {
        let candidate = CandidateDetection::default()
            .with_label("person")
            .with_x1y1_x2y2(0.4, 0.25, 0.6, 0.5);
        let d = estimate_for(&candidate, &camera(), &ReferenceHeights::default()).unwrap();
        assert_relative_eq!(d, 9.066_667, epsilon = 1e-3);
    }
}
