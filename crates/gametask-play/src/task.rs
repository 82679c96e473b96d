use std::path::PathBuf;

use anyhow::Result;
use gametask_types::{EmulatorBackend, Surface};

use crate::instructions::InstructionScreen;

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// A frame was drawn; call again on the next refresh.
    Yield,
    /// Nothing left to show.
    Finished,
}

/// Where a run writes its recordings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub dir: PathBuf,
    /// Run prefix of every output file, e.g. `sub-01_ses-001_task-game_run-1`.
    pub fname_base: String,
}

impl TaskOutput {
    pub fn new(dir: impl Into<PathBuf>, fname_base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            fname_base: fname_base.into(),
        }
    }
}

/// Lifecycle of a game task within an experiment session.
///
/// The scheduler calls `setup` once, ticks the instruction screen, then
/// `tick`s the task once per display refresh until it finishes, and finally
/// calls `stop` and `unload`.
pub trait GameTask {
    fn name(&self) -> &str;

    /// Create the emulator and the audio stream.
    fn setup(&mut self, backend: &dyn EmulatorBackend, output: TaskOutput) -> Result<()>;

    /// Instruction screen shown before the run.
    fn instructions(&self) -> InstructionScreen;

    /// Advance one presentation frame.
    fn tick(&mut self, exp: &mut dyn Surface, ctl: Option<&mut dyn Surface>)
    -> Result<TickResult>;

    /// Silence the audio output.
    fn stop(&mut self);

    /// Release the emulator.
    fn unload(&mut self);
}

/// Tick instructions and then the task until both finish, stopping and
/// unloading the task afterwards (also on error). Returns the number of task
/// frames drawn.
pub fn run_to_completion(
    task: &mut dyn GameTask,
    exp: &mut dyn Surface,
    mut ctl: Option<&mut dyn Surface>,
) -> Result<usize> {
    let mut screen = task.instructions();
    while screen.tick(exp, reborrow(&mut ctl))? == TickResult::Yield {}

    let mut frames = 0;
    let result = loop {
        match task.tick(exp, reborrow(&mut ctl)) {
            Ok(TickResult::Yield) => frames += 1,
            Ok(TickResult::Finished) => break Ok(frames),
            Err(e) => break Err(e),
        }
    };
    task.stop();
    task.unload();
    log::info!("{} finished after {} frames", task.name(), frames);
    result
}

/// Shorter-lived copy of an optional window borrow, for passing it on
/// several times.
pub(crate) fn reborrow<'a>(ctl: &'a mut Option<&mut dyn Surface>) -> Option<&'a mut dyn Surface> {
    match ctl {
        Some(surface) => Some(&mut **surface as &mut dyn Surface),
        None => None,
    }
}
