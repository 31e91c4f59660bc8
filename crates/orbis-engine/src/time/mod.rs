//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - one `FrameClock` per render loop; `tick()` once per presented frame
//! - `FrameStats` aggregates ticks into periodic FPS reports

mod frame_clock;
mod frame_stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_stats::{FrameReport, FrameStats};
