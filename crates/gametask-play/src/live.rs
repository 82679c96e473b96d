use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use gametask_audio::AudioBlockStream;
use gametask_input::{ButtonMap, InputHook, InputSource, KeyEventBuffer, KeyState};
use gametask_types::config::DEFAULT_GAME;
use gametask_types::{
    Emulator, EmulatorBackend, EmulatorSettings, InitialState, Surface, TaskConfig, TimeProvider,
};

use crate::exp_log;
use crate::instructions::InstructionScreen;
use crate::movie_path::next_movie_path;
use crate::renderer::FrameRenderer;
use crate::reward::RewardTracker;
use crate::task::{GameTask, TaskOutput, TickResult, reborrow};

const DEFAULT_INSTRUCTION: &str = "Let's play a video game.\n{game} : {state}\nHave fun!";

/// What to play and for how long.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoGameSettings {
    pub game_name: String,
    /// Save state to start from; the game's default when `None`.
    pub state_name: Option<String>,
    pub scenario: Option<String>,
    /// Start a new session whenever an episode ends.
    pub repeat_scenario: bool,
    /// No new session is started once the run is older than this. Zero means
    /// no limit.
    pub max_duration: Option<Duration>,
    /// Instruction text. `{game}` and `{state}` are substituted.
    pub instruction: Option<String>,
}

impl VideoGameSettings {
    pub fn new(game_name: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            state_name: None,
            scenario: None,
            repeat_scenario: true,
            max_duration: None,
            instruction: None,
        }
    }

    fn state_label(&self) -> &str {
        self.state_name.as_deref().unwrap_or("None")
    }
}

impl Default for VideoGameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_GAME)
    }
}

/// Where the live loop is within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePhase {
    /// Set up but not ticked yet.
    NotStarted,
    /// Reset the emulator and pick the next movie file.
    SessionStart,
    /// Start recording and announce the session.
    Recording,
    /// One emulator step per tick.
    Stepping,
    /// The episode ended; decide whether another session follows.
    EpisodeDone,
    /// Key handlers removed, nothing left to do.
    RunDone,
}

fn not_set_up() -> anyhow::Error {
    anyhow!("video game task ticked before setup")
}

/// Live play: the participant's keys drive the emulator, every session is
/// recorded to its own movie.
pub struct VideoGame {
    settings: VideoGameSettings,
    config: TaskConfig,
    clock: Arc<dyn TimeProvider>,
    hook: InputHook,
    keys: KeyState,
    emulator: Option<Box<dyn Emulator>>,
    renderer: Option<FrameRenderer>,
    output: Option<TaskOutput>,
    phase: LivePhase,
    reward: RewardTracker,
    movie_path: Option<PathBuf>,
    recording: bool,
    episode_over: bool,
    run_start_us: i64,
    sessions: usize,
    session_steps: u64,
}

impl VideoGame {
    /// `sources` are the windows whose key presses control the game.
    pub fn new(
        settings: VideoGameSettings,
        config: TaskConfig,
        clock: Arc<dyn TimeProvider>,
        sources: Vec<Box<dyn InputSource>>,
    ) -> Result<Self> {
        config.validate()?;
        let keys = KeyState::new(ButtonMap::from_names(&config.button_map)?);
        let buffer = Arc::new(KeyEventBuffer::new(Arc::clone(&clock)));
        Ok(Self {
            settings,
            config,
            clock,
            hook: InputHook::new(buffer, sources),
            keys,
            emulator: None,
            renderer: None,
            output: None,
            phase: LivePhase::NotStarted,
            reward: RewardTracker::new(),
            movie_path: None,
            recording: false,
            episode_over: false,
            run_start_us: 0,
            sessions: 0,
            session_steps: 0,
        })
    }

    pub fn settings(&self) -> &VideoGameSettings {
        &self.settings
    }

    pub fn phase(&self) -> LivePhase {
        self.phase
    }

    /// Sessions started so far.
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    /// Movie of the current (or last) session.
    pub fn movie_path(&self) -> Option<&Path> {
        self.movie_path.as_deref()
    }

    pub fn total_reward(&self) -> f64 {
        self.reward.total()
    }

    pub fn key_state(&self) -> &KeyState {
        &self.keys
    }

    pub fn is_input_attached(&self) -> bool {
        self.hook.is_attached()
    }

    /// Stream to hand to the audio device once set up.
    pub fn audio_stream(&self) -> Option<Arc<AudioBlockStream>> {
        self.renderer.as_ref().map(|r| Arc::clone(r.stream()))
    }

    fn should_start_session(&self) -> bool {
        if !self.settings.repeat_scenario {
            return false;
        }
        match self.settings.max_duration {
            Some(max) if !max.is_zero() => self.clock.elapsed_since(self.run_start_us) <= max,
            _ => true,
        }
    }

    fn advance(
        &mut self,
        exp: &mut dyn Surface,
        mut ctl: Option<&mut dyn Surface>,
    ) -> Result<TickResult> {
        loop {
            match self.phase {
                LivePhase::NotStarted => {
                    if self.emulator.is_none() {
                        return Err(not_set_up());
                    }
                    self.hook.attach()?;
                    self.run_start_us = self.clock.now_us();
                    self.phase = LivePhase::SessionStart;
                }
                LivePhase::SessionStart => {
                    let emulator = self.emulator.as_deref_mut().ok_or_else(not_set_up)?;
                    emulator.reset()?;
                    let output = self.output.as_ref().ok_or_else(not_set_up)?;
                    let path = next_movie_path(
                        &output.dir,
                        &output.fname_base,
                        &self.settings.game_name,
                        self.settings.state_name.as_deref(),
                    )?;
                    self.movie_path = Some(path);
                    self.phase = LivePhase::Recording;
                }
                LivePhase::Recording => {
                    let path = self.movie_path.as_deref().ok_or_else(not_set_up)?;
                    let emulator = self.emulator.as_deref_mut().ok_or_else(not_set_up)?;
                    log::info!("recording movie in {}", path.display());
                    emulator
                        .record_movie(path)
                        .with_context(|| format!("failed to record movie {}", path.display()))?;
                    self.recording = true;
                    self.reward.reset();
                    self.session_steps = 0;
                    self.sessions += 1;
                    exp.log_on_flip(exp_log::session_start(
                        &self.settings.game_name,
                        self.settings.state_label(),
                    ));
                    self.phase = LivePhase::Stepping;
                }
                LivePhase::Stepping => {
                    if self.episode_over {
                        self.episode_over = false;
                        self.phase = LivePhase::EpisodeDone;
                        continue;
                    }
                    return self.step_frame(exp, reborrow(&mut ctl));
                }
                LivePhase::EpisodeDone => {
                    let emulator = self.emulator.as_deref_mut().ok_or_else(not_set_up)?;
                    emulator.stop_record();
                    self.recording = false;
                    log::info!(
                        "session {} ended after {} steps, reward {}",
                        self.sessions,
                        self.session_steps,
                        self.reward.total()
                    );
                    self.phase = if self.should_start_session() {
                        LivePhase::SessionStart
                    } else {
                        LivePhase::RunDone
                    };
                }
                LivePhase::RunDone => {
                    self.hook.detach();
                    return Ok(TickResult::Finished);
                }
            }
        }
    }

    fn step_frame(
        &mut self,
        exp: &mut dyn Surface,
        ctl: Option<&mut dyn Surface>,
    ) -> Result<TickResult> {
        let (Some(emulator), Some(renderer)) =
            (self.emulator.as_deref_mut(), self.renderer.as_ref())
        else {
            return Err(not_set_up());
        };

        self.hook.buffer().drain_into(&mut self.keys);
        let step = emulator.step(self.keys.actions())?;
        self.session_steps += 1;
        if let Some(total) = self.reward.add(step.reward) {
            exp.log_on_flip(exp_log::reward(total));
        }
        let audio = emulator.audio();
        renderer.render(&step.observation, &audio, exp, ctl)?;
        self.episode_over = step.done;
        Ok(TickResult::Yield)
    }
}

impl GameTask for VideoGame {
    fn name(&self) -> &str {
        "VideoGame"
    }

    fn setup(&mut self, backend: &dyn EmulatorBackend, output: TaskOutput) -> Result<()> {
        if self.emulator.is_some() {
            bail!("video game task is already set up");
        }
        let settings = EmulatorSettings {
            game: self.settings.game_name.clone(),
            state: match &self.settings.state_name {
                Some(state) => InitialState::Named(state.clone()),
                None => InitialState::Default,
            },
            scenario: self.settings.scenario.clone(),
            record: false,
            players: 1,
        };
        let emulator = backend
            .make(&settings)
            .with_context(|| format!("failed to start {}", self.settings.game_name))?;
        log::debug!(
            "{} exposes {} buttons, key map has {}",
            self.settings.game_name,
            emulator.num_buttons(),
            self.keys.actions().len()
        );

        let stream = Arc::new(AudioBlockStream::new(
            self.config.audio_block_size,
            self.config.audio_sample_rate,
        ));
        self.renderer = Some(FrameRenderer::new(stream));
        self.emulator = Some(emulator);
        self.output = Some(output);
        Ok(())
    }

    fn instructions(&self) -> InstructionScreen {
        let template = self
            .settings
            .instruction
            .as_deref()
            .unwrap_or(DEFAULT_INSTRUCTION);
        let text = template
            .replace("{game}", &self.settings.game_name)
            .replace("{state}", self.settings.state_label());
        InstructionScreen::new(
            text,
            self.config.wrap_width,
            self.config.instruction_frames(),
        )
    }

    fn tick(
        &mut self,
        exp: &mut dyn Surface,
        ctl: Option<&mut dyn Surface>,
    ) -> Result<TickResult> {
        let result = self.advance(exp, ctl);
        if result.is_err() {
            self.hook.detach();
            self.phase = LivePhase::RunDone;
        }
        result
    }

    fn stop(&mut self) {
        if let Some(renderer) = &self.renderer {
            renderer.stream().stop();
        }
    }

    fn unload(&mut self) {
        self.hook.detach();
        if let Some(mut emulator) = self.emulator.take() {
            if self.recording {
                emulator.stop_record();
                self.recording = false;
            }
            emulator.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametask_types::MockTimeProvider;
    use gametask_types::mock::{MockBackend, MockScript, RecordingSurface};

    fn game(settings: VideoGameSettings) -> VideoGame {
        VideoGame::new(
            settings,
            TaskConfig::default(),
            Arc::new(MockTimeProvider::new()),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_instruction_names_game_and_state() {
        let mut settings = VideoGameSettings::new("Shinobi");
        settings.state_name = Some("Level1".into());
        let screen = game(settings).instructions();
        assert_eq!(
            screen.text(),
            "Let's play a video game.\nShinobi : Level1\nHave fun!"
        );
    }

    #[test]
    fn test_custom_instruction_without_state() {
        let mut settings = VideoGameSettings::new("Shinobi");
        settings.instruction = Some("Play {game} ({state})".into());
        assert_eq!(game(settings).instructions().text(), "Play Shinobi (None)");
    }

    #[test]
    fn test_tick_before_setup_fails() {
        let mut task = game(VideoGameSettings::default());
        let mut exp = RecordingSurface::new(800, 600);
        assert!(task.tick(&mut exp, None).is_err());
        assert_eq!(task.phase(), LivePhase::RunDone);
    }

    #[test]
    fn test_setup_requests_named_state_without_engine_recording() {
        let backend = MockBackend::new(MockScript::default());
        let mut settings = VideoGameSettings::new("Shinobi");
        settings.state_name = Some("Level1".into());
        settings.scenario = Some("scenario.json".into());
        let mut task = game(settings);
        task.setup(&backend, TaskOutput::new("out", "run")).unwrap();

        let log = backend.log();
        let log = log.lock().unwrap();
        assert_eq!(log.settings.len(), 1);
        assert_eq!(log.settings[0].state, InitialState::Named("Level1".into()));
        assert_eq!(log.settings[0].scenario.as_deref(), Some("scenario.json"));
        assert!(!log.settings[0].record);
        assert!(task.audio_stream().is_some());
    }

    #[test]
    fn test_invalid_button_map_rejected() {
        let config = TaskConfig {
            button_map: vec!["y".into()],
            ..Default::default()
        };
        let result = VideoGame::new(
            VideoGameSettings::default(),
            config,
            Arc::new(MockTimeProvider::new()),
            Vec::new(),
        );
        assert!(result.is_err());
    }
}
