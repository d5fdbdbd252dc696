// Audio module - click synthesis and output sink

pub mod click;
pub mod output;
pub mod sink;

pub use click::{ClickPlayer, ClickTone};
pub use output::{AudioError, ClickHandle, ClickOutput};
pub use sink::{NullSink, SoundSink};
