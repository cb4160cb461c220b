//! Tessera engine crate.
//!
//! The engine owns simulation state, layout and pixel production. A native host
//! owns the window, the GPU device and the event source, and drives the engine
//! through [`Engine`] (or the C ABI in `tessera-ffi`).
//!
//! Per displayed frame the host calls [`Engine::render`] with a pixel buffer and
//! an animation counter, interleaved with input calls as raw events arrive.
//! Logical ticks happen inside the engine on a fixed [`TICK_DURATION`] schedule.

pub mod coords;
pub mod editor;
pub mod engine;
pub mod input;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod text;
pub mod time;
pub mod uniforms;

pub use engine::{Engine, EngineConfig, EngineError, FrameReport};
pub use input::KeyCode;
pub use time::TICK_DURATION;
