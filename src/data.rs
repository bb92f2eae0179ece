mod frame_report;
mod reference_heights;
mod result_sink;
mod send_channels;
mod time_calc;

pub use frame_report::{FrameOutcome, FrameReport, StageTimings};
pub use reference_heights::{LabelHeight, ReferenceHeights};
pub use result_sink::{ProfiledSink, ResultSink};
pub use send_channels::{detection_channels, ChannelSink, DetectionState, SendState};
pub use time_calc::TimeCalc;
