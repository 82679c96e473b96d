//! Frame loops presenting a video game during an experiment run.
//!
//! - [`VideoGame`]: live play from the participant's keys, recorded to movies
//! - [`VideoGameReplay`]: playback of a recorded movie
//!
//! Both are driven one presentation frame per [`GameTask::tick`].

mod exp_log;
mod instructions;
mod live;
mod movie_path;
mod renderer;
mod replay;
mod reward;
mod task;

pub use instructions::InstructionScreen;
pub use live::{LivePhase, VideoGame, VideoGameSettings};
pub use movie_path::{MOVIE_EXTENSION, movie_file_name, next_movie_path};
pub use renderer::{FrameRenderer, prepare_image};
pub use replay::{VideoGameReplay, movie_actions};
pub use reward::RewardTracker;
pub use task::{GameTask, TaskOutput, TickResult, run_to_completion};
