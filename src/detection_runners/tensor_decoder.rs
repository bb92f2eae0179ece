use ndarray::{ArrayView3, Axis};
use crate::common::{CandidateDetection, ObstacleBox, OutputShape, BOX_CHANNELS};

/// Decodes a channel-major `[1, 4 + num_classes, num_elements]` output tensor.
///
/// Returns `None` ("not ready") when the shape is unset or the buffer length
/// does not match it. Otherwise yields at most one candidate per anchor
/// element, in element order: the highest-scoring class (first one wins on
/// ties) if its score is above `confidence_threshold` and all four corners
/// fall within `[0, 1]`. Out-of-range boxes are dropped, never clamped.
pub fn decode(
    tensor: &[f32],
    shape: &OutputShape,
    confidence_threshold: f32,
    labels: &[String],
) -> Option<Vec<CandidateDetection>> {
    if !shape.is_ready() {
        log::warn!("obstacle_detect: Output shape {:?} is not set, skipping frame", shape.dims());
        return None;
    }
    if tensor.len() != shape.len() {
        log::warn!(
            "obstacle_detect: Output tensor has {} values, shape {:?} needs {}, skipping frame",
            tensor.len(), shape.dims(), shape.len()
        );
        return None;
    }

    let view = match ArrayView3::from_shape((1, shape.channels(), shape.num_elements), tensor) {
        Ok(view) => view,
        Err(err) => {
            log::warn!("obstacle_detect: Failed to view output tensor: {}", err);
            return None;
        }
    };

    // (C, E) with box geometry in the first four channels
    let preds = view.index_axis(Axis(0), 0);
    let (slice_bboxes, slice_clss) = preds.split_at(Axis(0), BOX_CHANNELS);

    let mut out_of_range = 0usize;
    let mut candidates = Vec::new();

    for (e, clss) in slice_clss.axis_iter(Axis(1)).enumerate() {
        // NaN scores never win the argmax
        let mut class_id = 0usize;
        let mut confidence = f32::NEG_INFINITY;
        for (c, &conf) in clss.iter().enumerate() {
            if conf > confidence {
                confidence = conf;
                class_id = c;
            }
        }

        if !(confidence > confidence_threshold) {
            continue;
        }

        let cx = slice_bboxes[[0, e]];
        let cy = slice_bboxes[[1, e]];
        let w = slice_bboxes[[2, e]];
        let h = slice_bboxes[[3, e]];
        let bbox = ObstacleBox::default().with_cxcy_wh(cx, cy, w, h);

        if !bbox.is_normalized() || bbox.x1 > bbox.x2 {
            out_of_range += 1;
            continue;
        }

        let label = match labels.get(class_id) {
            Some(label) => label.clone(),
            None => format!("# {}", class_id),
        };

        candidates.push(CandidateDetection {
            class_id,
            label,
            confidence,
            bbox,
        });
    }

    log::trace!(
        "Decoded {} candidates from {} elements ({} out of range)",
        candidates.len(), shape.num_elements, out_of_range
    );

    Some(candidates)
}
