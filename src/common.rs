mod camera_geometry;
mod candidate_detection;
mod obstacle_box;
mod obstacle_detection;
mod output_shape;
mod pipeline_config;

pub use camera_geometry::*;
pub use candidate_detection::*;
pub use obstacle_box::*;
pub use obstacle_detection::*;
pub use output_shape::*;
pub use pipeline_config::*;
