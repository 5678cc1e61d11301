//! Platform abstraction layer
//!
//! Turns raw browser key events into the per-tick `TickInput` snapshot.

pub mod input;

pub use input::KeyboardState;
