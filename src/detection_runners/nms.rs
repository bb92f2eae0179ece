pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
}

/// Greedy non-maximum suppression.
///
/// Boxes are ordered by confidence, highest first (ties keep their input
/// order). The first pass marks every box whose IoU with an already accepted,
/// higher-ranked box is `>= iou_threshold`; the second pass drops the marked
/// boxes. The result keeps the descending-confidence order.
pub fn suppress<T: Nms>(mut boxes: Vec<T>, iou_threshold: f32) -> Vec<T> {
    boxes.sort_by(|b1, b2| {
        b2.confidence()
            .partial_cmp(&b1.confidence())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut suppressed = vec![false; boxes.len()];
    for index in 0..boxes.len() {
        if suppressed[index] {
            continue;
        }
        for other in (index + 1)..boxes.len() {
            if !suppressed[other] && boxes[index].iou(&boxes[other]) >= iou_threshold {
                suppressed[other] = true;
            }
        }
    }

    boxes
        .into_iter()
        .zip(suppressed)
        .filter_map(|(b, dropped)| (!dropped).then_some(b))
        .collect()
}
