//! Audio path from the emulator to the sound device.
//!
//! The play loop pushes one [`AudioBlock`] per frame into an
//! [`AudioBlockStream`]; the device callback pulls blocks from it and gets
//! silence whenever the loop falls behind.

mod block;
mod block_stream;
mod reader;

#[cfg(feature = "cpal")]
mod cpal_output;

pub use block::{AudioBlock, CHANNELS, I16_SCALE};
pub use block_stream::{AudioBlockStream, DEFAULT_MAX_QUEUED_BLOCKS, SoundStatus};
pub use reader::BlockReader;

#[cfg(feature = "cpal")]
pub use cpal_output::CpalOutput;
