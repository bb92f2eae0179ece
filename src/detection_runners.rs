pub mod detection_pipeline;
pub mod distance_estimator;
pub mod nms;
pub mod tensor_decoder;

pub use detection_pipeline::DetectionPipeline;
pub use distance_estimator::{estimate_distance, estimate_for};
pub use nms::{suppress, Nms};
pub use tensor_decoder::decode;
