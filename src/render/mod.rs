//! Per-frame draw lists, hit-testing and the macroquad drawing adapter.

pub mod draw;
mod frame;
mod pick;

pub use frame::{build_frame, DrawOp, Frame, InteractiveRegion};
pub use pick::{pick, Selection};
