//! Deterministic collaborators for exercising the frame loops without an
//! emulation engine or a window.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow, bail};

use crate::emulator::{Emulator, EmulatorBackend, EmulatorSettings, Movie, StepResult};
use crate::frame::{ImageFrame, Observation};
use crate::surface::{Surface, TextStim};

/// Everything the mock emulators were asked to do, shared with the test.
#[derive(Debug, Default)]
pub struct EmulatorLog {
    pub settings: Vec<EmulatorSettings>,
    pub resets: usize,
    pub actions: Vec<Vec<bool>>,
    pub movies: Vec<PathBuf>,
    pub stopped_recordings: usize,
    pub initial_state: Option<Vec<u8>>,
    pub closed: bool,
}

/// Behaviour of the emulators a [`MockBackend`] creates.
#[derive(Debug, Clone)]
pub struct MockScript {
    pub num_buttons: usize,
    /// Steps after each reset until `done` is reported.
    pub episode_len: usize,
    /// Reward for each step of an episode; missing entries are 0.
    pub rewards: Vec<f64>,
    /// Stereo frames returned by `audio()`.
    pub audio_frames: usize,
    /// Fail the n-th step (0-based, counted across episodes).
    pub fail_at_step: Option<usize>,
    pub width: usize,
    pub height: usize,
}

impl Default for MockScript {
    fn default() -> Self {
        Self {
            num_buttons: 12,
            episode_len: 3,
            rewards: Vec::new(),
            audio_frames: 800,
            fail_at_step: None,
            width: 4,
            height: 3,
        }
    }
}

pub struct MockEmulator {
    script: MockScript,
    log: Arc<Mutex<EmulatorLog>>,
    episode_step: usize,
    total_steps: usize,
}

impl Emulator for MockEmulator {
    fn reset(&mut self) -> Result<()> {
        self.episode_step = 0;
        self.log.lock().unwrap().resets += 1;
        Ok(())
    }

    fn step(&mut self, actions: &[bool]) -> Result<StepResult> {
        if self.script.fail_at_step == Some(self.total_steps) {
            bail!("emulator core crashed at step {}", self.total_steps);
        }
        self.log.lock().unwrap().actions.push(actions.to_vec());

        let reward = self
            .script
            .rewards
            .get(self.episode_step)
            .copied()
            .unwrap_or(0.0);
        let shade = (self.total_steps % 256) as u8;
        let pixels = vec![shade; self.script.width * self.script.height * 3];

        self.episode_step += 1;
        self.total_steps += 1;

        Ok(StepResult {
            observation: Observation::new(self.script.width, self.script.height, 3, pixels),
            reward,
            done: self.episode_step >= self.script.episode_len,
            info: serde_json::json!({ "step": self.total_steps }),
        })
    }

    fn audio(&mut self) -> Vec<i16> {
        vec![16384; self.script.audio_frames * 2]
    }

    fn num_buttons(&self) -> usize {
        self.script.num_buttons
    }

    fn record_movie(&mut self, path: &Path) -> Result<()> {
        File::create(path)?;
        self.log.lock().unwrap().movies.push(path.to_path_buf());
        Ok(())
    }

    fn stop_record(&mut self) {
        self.log.lock().unwrap().stopped_recordings += 1;
    }

    fn set_initial_state(&mut self, state: Vec<u8>) {
        self.log.lock().unwrap().initial_state = Some(state);
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closed = true;
    }
}

/// Movie backed by an in-memory table indexed `[frame][player][button]`.
#[derive(Debug, Clone, Default)]
pub struct MockMovie {
    frames: Vec<Vec<Vec<bool>>>,
    cursor: Option<usize>,
    state: Vec<u8>,
    players: usize,
}

impl MockMovie {
    pub fn new(frames: Vec<Vec<Vec<bool>>>, players: usize, state: Vec<u8>) -> Self {
        Self {
            frames,
            cursor: None,
            state,
            players,
        }
    }
}

impl Movie for MockMovie {
    fn step(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.frames.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    fn get_key(&self, button: usize, player: usize) -> bool {
        self.cursor
            .and_then(|c| self.frames.get(c))
            .and_then(|frame| frame.get(player))
            .and_then(|buttons| buttons.get(button))
            .copied()
            .unwrap_or(false)
    }

    fn state(&self) -> Vec<u8> {
        self.state.clone()
    }

    fn players(&self) -> usize {
        self.players
    }
}

/// Backend handing out [`MockEmulator`]s and a fixed [`MockMovie`].
pub struct MockBackend {
    pub script: MockScript,
    pub movie: Option<MockMovie>,
    log: Arc<Mutex<EmulatorLog>>,
}

impl MockBackend {
    pub fn new(script: MockScript) -> Self {
        Self {
            script,
            movie: None,
            log: Arc::new(Mutex::new(EmulatorLog::default())),
        }
    }

    pub fn with_movie(mut self, movie: MockMovie) -> Self {
        self.movie = Some(movie);
        self
    }

    /// Shared log of every emulator this backend created.
    pub fn log(&self) -> Arc<Mutex<EmulatorLog>> {
        Arc::clone(&self.log)
    }
}

impl EmulatorBackend for MockBackend {
    fn make(&self, settings: &EmulatorSettings) -> Result<Box<dyn Emulator>> {
        self.log.lock().unwrap().settings.push(settings.clone());
        Ok(Box::new(MockEmulator {
            script: self.script.clone(),
            log: Arc::clone(&self.log),
            episode_step: 0,
            total_steps: 0,
        }))
    }

    fn open_movie(&self, path: &Path) -> Result<Box<dyn Movie>> {
        let movie = self
            .movie
            .clone()
            .ok_or_else(|| anyhow!("no movie scripted for {}", path.display()))?;
        Ok(Box::new(movie))
    }
}

/// Recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Image(ImageFrame),
    Text(String),
    Log(String),
}

/// A Surface that records calls instead of drawing. Does not need a window.
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    width: u32,
    height: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            width,
            height,
        }
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn images(&self) -> Vec<&ImageFrame> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Image(image) => Some(image),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Log(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_image(&mut self, image: &ImageFrame) -> Result<()> {
        self.commands.push(SurfaceCommand::Image(image.clone()));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextStim) -> Result<()> {
        self.commands.push(SurfaceCommand::Text(text.text.clone()));
        Ok(())
    }

    fn log_on_flip(&mut self, message: String) {
        self.commands.push(SurfaceCommand::Log(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_emulator_reports_done_after_episode_len() {
        let backend = MockBackend::new(MockScript {
            episode_len: 2,
            ..Default::default()
        });
        let mut emu = backend.make(&EmulatorSettings::new("Game")).unwrap();
        emu.reset().unwrap();
        assert!(!emu.step(&[false; 12]).unwrap().done);
        assert!(emu.step(&[false; 12]).unwrap().done);
        emu.reset().unwrap();
        assert!(!emu.step(&[false; 12]).unwrap().done);
        assert_eq!(backend.log().lock().unwrap().resets, 2);
    }

    #[test]
    fn mock_movie_steps_until_exhausted() {
        let mut movie = MockMovie::new(vec![vec![vec![true]], vec![vec![false]]], 1, vec![]);
        assert!(!movie.get_key(0, 0));
        assert!(movie.step());
        assert!(movie.get_key(0, 0));
        assert!(movie.step());
        assert!(!movie.get_key(0, 0));
        assert!(!movie.step());
    }
}
