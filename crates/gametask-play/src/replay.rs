use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use gametask_audio::AudioBlockStream;
use gametask_types::{
    Emulator, EmulatorBackend, EmulatorSettings, InitialState, Movie, Surface, TaskConfig,
    TaskError,
};

use crate::exp_log;
use crate::instructions::InstructionScreen;
use crate::renderer::FrameRenderer;
use crate::reward::RewardTracker;
use crate::task::{GameTask, TaskOutput, TickResult};

/// Action vector for the movie's current frame: every button of player 0,
/// then every button of player 1, and so on.
pub fn movie_actions(movie: &dyn Movie, num_buttons: usize) -> Vec<bool> {
    let players = movie.players();
    let mut actions = Vec::with_capacity(players * num_buttons);
    for player in 0..players {
        for button in 0..num_buttons {
            actions.push(movie.get_key(button, player));
        }
    }
    actions
}

/// Plays back a recorded movie. Finishes when the movie runs out.
pub struct VideoGameReplay {
    movie_path: PathBuf,
    game_name: String,
    scenario: Option<String>,
    config: TaskConfig,
    movie: Option<Box<dyn Movie>>,
    emulator: Option<Box<dyn Emulator>>,
    renderer: Option<FrameRenderer>,
    reward: RewardTracker,
    started: bool,
    frames: u64,
}

impl VideoGameReplay {
    /// Fails right away if `movie_path` does not exist.
    pub fn new(
        movie_path: impl Into<PathBuf>,
        game_name: impl Into<String>,
        scenario: Option<String>,
        config: TaskConfig,
    ) -> Result<Self, TaskError> {
        let movie_path = movie_path.into();
        let exists = movie_path.try_exists().map_err(|source| TaskError::Io {
            path: movie_path.clone(),
            source,
        })?;
        if !exists {
            return Err(TaskError::MovieNotFound(movie_path));
        }
        config.validate()?;
        Ok(Self {
            movie_path,
            game_name: game_name.into(),
            scenario,
            config,
            movie: None,
            emulator: None,
            renderer: None,
            reward: RewardTracker::new(),
            started: false,
            frames: 0,
        })
    }

    pub fn movie_path(&self) -> &Path {
        &self.movie_path
    }

    pub fn total_reward(&self) -> f64 {
        self.reward.total()
    }

    /// Movie frames played so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn audio_stream(&self) -> Option<Arc<AudioBlockStream>> {
        self.renderer.as_ref().map(|r| Arc::clone(r.stream()))
    }
}

impl GameTask for VideoGameReplay {
    fn name(&self) -> &str {
        "VideoGameReplay"
    }

    fn setup(&mut self, backend: &dyn EmulatorBackend, output: TaskOutput) -> Result<()> {
        if self.emulator.is_some() {
            bail!("replay task is already set up");
        }
        let movie = backend
            .open_movie(&self.movie_path)
            .with_context(|| format!("failed to open movie {}", self.movie_path.display()))?;

        let settings = EmulatorSettings {
            game: self.game_name.clone(),
            state: InitialState::Empty,
            scenario: self.scenario.clone(),
            record: false,
            players: movie.players(),
        };
        let mut emulator = backend
            .make(&settings)
            .with_context(|| format!("failed to start {}", self.game_name))?;
        emulator.set_initial_state(movie.state());
        emulator.reset()?;

        log::info!(
            "replaying {} ({} players) into run {} under {}",
            self.movie_path.display(),
            movie.players(),
            output.fname_base,
            output.dir.display()
        );

        let stream = Arc::new(AudioBlockStream::new(
            self.config.audio_block_size,
            self.config.audio_sample_rate,
        ));
        self.renderer = Some(FrameRenderer::new(stream));
        self.movie = Some(movie);
        self.emulator = Some(emulator);
        Ok(())
    }

    fn instructions(&self) -> InstructionScreen {
        InstructionScreen::new(
            format!("You are going to watch someone play {}.", self.game_name),
            self.config.wrap_width,
            self.config.instruction_frames(),
        )
    }

    fn tick(
        &mut self,
        exp: &mut dyn Surface,
        ctl: Option<&mut dyn Surface>,
    ) -> Result<TickResult> {
        let (Some(movie), Some(emulator), Some(renderer)) = (
            self.movie.as_deref_mut(),
            self.emulator.as_deref_mut(),
            self.renderer.as_ref(),
        ) else {
            return Err(anyhow!("replay task ticked before setup"));
        };

        if !self.started {
            self.started = true;
            exp.log_on_flip(exp_log::replay_start(&self.game_name));
        }

        if !movie.step() {
            log::info!("movie ended after {} frames", self.frames);
            return Ok(TickResult::Finished);
        }
        self.frames += 1;

        let actions = movie_actions(movie, emulator.num_buttons());
        let step = emulator.step(&actions)?;
        if let Some(total) = self.reward.add(step.reward) {
            exp.log_on_flip(exp_log::reward(total));
        }
        let audio = emulator.audio();
        renderer.render(&step.observation, &audio, exp, ctl)?;
        Ok(TickResult::Yield)
    }

    fn stop(&mut self) {
        if let Some(renderer) = &self.renderer {
            renderer.stream().stop();
        }
    }

    fn unload(&mut self) {
        if let Some(mut emulator) = self.emulator.take() {
            emulator.close();
        }
        self.movie = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametask_types::mock::MockMovie;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_missing_movie_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bk2");
        let err = VideoGameReplay::new(&path, "Shinobi", None, TaskConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, TaskError::MovieNotFound(p) if p == path));
    }

    #[test]
    fn test_existing_movie_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.bk2");
        File::create(&path).unwrap();
        let task = VideoGameReplay::new(&path, "Shinobi", None, TaskConfig::default()).unwrap();
        assert_eq!(task.movie_path(), path);
        assert_eq!(
            task.instructions().text(),
            "You are going to watch someone play Shinobi."
        );
    }

    #[test]
    fn test_movie_actions_are_player_major() {
        let p0: Vec<bool> = (0..12).map(|b| b == 0).collect();
        let p1: Vec<bool> = (0..12).map(|b| b == 11).collect();
        let mut movie = MockMovie::new(vec![vec![p0, p1]], 2, vec![]);
        assert!(movie.step());

        let actions = movie_actions(&movie, 12);
        assert_eq!(actions.len(), 24);
        assert!(actions[0]);
        assert!(actions[23]);
        assert_eq!(actions.iter().filter(|a| **a).count(), 2);
    }
}
