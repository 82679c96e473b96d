use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::block::AudioBlock;

/// Blocks queued beyond this are evicted oldest first.
pub const DEFAULT_MAX_QUEUED_BLOCKS: usize = 30;

/// Playback status of a block stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundStatus {
    #[default]
    NotStarted,
    Playing,
    Stopped,
}

struct StreamState {
    queue: VecDeque<AudioBlock>,
    /// Seconds of audio handed to the device.
    t: f64,
    status: SoundStatus,
}

/// Producer/consumer queue of audio blocks between the frame loop and the
/// audio device callback.
///
/// The consumer never waits: an empty queue yields a silent block of the
/// same shape.
pub struct AudioBlockStream {
    state: Mutex<StreamState>,
    block_size: usize,
    sample_rate: u32,
    max_queued: usize,
}

impl AudioBlockStream {
    pub fn new(block_size: usize, sample_rate: u32) -> Self {
        Self::with_max_queued(block_size, sample_rate, DEFAULT_MAX_QUEUED_BLOCKS)
    }

    pub fn with_max_queued(block_size: usize, sample_rate: u32, max_queued: usize) -> Self {
        Self {
            state: Mutex::new(StreamState {
                queue: VecDeque::new(),
                t: 0.0,
                status: SoundStatus::NotStarted,
            }),
            block_size,
            sample_rate,
            max_queued: max_queued.max(1),
        }
    }

    fn state(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a block for playback.
    pub fn add_block(&self, block: AudioBlock) {
        debug_assert_eq!(block.frames(), self.block_size);
        let mut state = self.state();
        if state.queue.len() >= self.max_queued {
            state.queue.pop_front();
            log::debug!("audio queue full, dropped oldest block");
        }
        state.queue.push_back(block);
    }

    /// Next block for the device, or silence if none is queued.
    /// Returns None once the stream is stopped.
    pub fn next_block(&self) -> Option<AudioBlock> {
        let mut state = self.state();
        if state.status == SoundStatus::Stopped {
            return None;
        }
        let block = state
            .queue
            .pop_front()
            .unwrap_or_else(|| AudioBlock::silence(self.block_size));
        state.t += self.block_size as f64 / self.sample_rate as f64;
        Some(block)
    }

    /// Start (or restart) playback.
    pub fn play(&self) {
        let mut state = self.state();
        if state.status != SoundStatus::Playing {
            log::debug!("audio stream playing");
        }
        state.status = SoundStatus::Playing;
    }

    /// Stop playback and drop queued blocks.
    pub fn stop(&self) {
        let mut state = self.state();
        state.status = SoundStatus::Stopped;
        state.queue.clear();
    }

    pub fn status(&self) -> SoundStatus {
        self.state().status
    }

    /// Seconds of audio pulled so far, silence included.
    pub fn elapsed_secs(&self) -> f64 {
        self.state().t
    }

    pub fn queued(&self) -> usize {
        self.state().queue.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
