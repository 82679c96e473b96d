//! Shared types and collaborator traits for the video game experiment tasks.
//!
//! The emulator, the presentation surfaces and the clock are external
//! collaborators; this crate defines the seams the task crates call into.

pub mod buttons;
pub mod config;
pub mod emulator;
pub mod error;
pub mod frame;
pub mod surface;
pub mod time;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use buttons::{BUTTON_COUNT, DEFAULT_BUTTON_MAP, UNMAPPED_BUTTON};
pub use config::TaskConfig;
pub use emulator::{Emulator, EmulatorBackend, EmulatorSettings, InitialState, Movie, StepResult};
pub use error::TaskError;
pub use frame::{ImageFrame, Observation};
pub use surface::{Surface, TextStim};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
