//! Keyboard input for the live play loop.
//!
//! This crate provides:
//! - [`KeyEventBuffer`]: press/release queues filled by the windowing callbacks
//! - [`KeyState`]: persistent per-button state indexed by the [`ButtonMap`]
//! - [`InputHook`]: guard that attaches the buffer to the input sources

mod button_map;
mod key_buffer;
mod key_event;
mod key_name;
mod key_state;
mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use button_map::ButtonMap;
pub use key_buffer::KeyEventBuffer;
pub use key_event::{KeyEvent, KeyRouting, KeyTransition, Modifiers};
pub use key_name::normalize_key_name;
pub use key_state::KeyState;
pub use source::{InputHook, InputSource};
