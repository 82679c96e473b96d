//! Seams to the game-emulation engine.

use std::path::Path;

use anyhow::Result;

use crate::frame::Observation;

/// Outcome of advancing the emulator by one frame.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    /// The scenario signalled the end of the episode.
    pub done: bool,
    /// Scenario variables reported by the emulator.
    pub info: serde_json::Value,
}

/// Which save state the emulator boots into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InitialState {
    /// The game's default start state.
    #[default]
    Default,
    /// A named save state shipped with the game integration.
    Named(String),
    /// No state; the caller injects one with [`Emulator::set_initial_state`].
    Empty,
}

/// Arguments for creating an emulator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorSettings {
    pub game: String,
    pub state: InitialState,
    pub scenario: Option<String>,
    /// Let the engine record movies on its own. Tasks record explicitly.
    pub record: bool,
    pub players: usize,
}

impl EmulatorSettings {
    pub fn new(game: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            state: InitialState::Default,
            scenario: None,
            record: false,
            players: 1,
        }
    }
}

/// A running emulator instance.
pub trait Emulator {
    /// Restart from the initial state.
    fn reset(&mut self) -> Result<()>;

    /// Advance one frame with `actions` held, player-major.
    fn step(&mut self, actions: &[bool]) -> Result<StepResult>;

    /// Audio produced by the last step, interleaved stereo i16.
    fn audio(&mut self) -> Vec<i16>;

    /// Buttons per player in the action vector.
    fn num_buttons(&self) -> usize;

    /// Start recording every following step to a movie file.
    fn record_movie(&mut self, path: &Path) -> Result<()>;

    /// Finish the current movie, if any.
    fn stop_record(&mut self);

    /// Replace the state used by the next `reset`.
    fn set_initial_state(&mut self, state: Vec<u8>);

    fn close(&mut self);
}

/// A recorded movie opened for playback.
pub trait Movie {
    /// Advance to the next recorded frame. Returns false once exhausted.
    fn step(&mut self) -> bool;

    /// Recorded state of `button` for `player` at the current frame.
    fn get_key(&self, button: usize, player: usize) -> bool;

    /// Emulator state the movie was recorded from.
    fn state(&self) -> Vec<u8>;

    fn players(&self) -> usize;
}

/// Factory for emulators and movies.
/// Implementations: the emulation engine bindings, MockBackend (testing).
pub trait EmulatorBackend {
    fn make(&self, settings: &EmulatorSettings) -> Result<Box<dyn Emulator>>;

    fn open_movie(&self, path: &Path) -> Result<Box<dyn Movie>>;
}
