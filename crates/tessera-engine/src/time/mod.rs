//! Time subsystem.
//!
//! Logical time advances in fixed [`TICK_DURATION`] steps, independent of how
//! often the host calls in. Intended usage:
//! - one `TickClock` per engine instance
//! - feed it [`TimeSource::now`] once per `render`/`update` call
//! - run the returned [`TickBatch`] of simulation ticks

mod source;
mod tick_clock;

pub use source::{ManualTime, MonotonicTime, TimeSource};
pub use tick_clock::{TickBatch, TickClock, DEFAULT_MAX_CATCH_UP, TICK_DURATION};
