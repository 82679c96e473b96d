//! Replay loop against scripted movies.

use std::fs::File;
use std::path::PathBuf;

use gametask_play::{GameTask, TaskOutput, TickResult, VideoGameReplay};
use gametask_types::mock::{MockBackend, MockMovie, MockScript, RecordingSurface};
use gametask_types::{InitialState, TaskConfig};
use tempfile::{TempDir, tempdir};

fn movie_file() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sub-01_run-1_Game_Level1_000.bk2");
    File::create(&path).unwrap();
    (dir, path)
}

/// `frames` frames for two players; player 1 holds the last button.
fn two_player_movie(frames: usize) -> MockMovie {
    let p0: Vec<bool> = (0..12).map(|b| b == 4).collect();
    let p1: Vec<bool> = (0..12).map(|b| b == 11).collect();
    MockMovie::new(vec![vec![p0, p1]; frames], 2, vec![1, 2, 3])
}

#[test]
fn replays_every_movie_frame_then_finishes() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript {
        episode_len: 2,
        ..Default::default()
    })
    .with_movie(two_player_movie(3));
    let mut task = VideoGameReplay::new(&path, "Game", None, TaskConfig::default()).unwrap();
    task.setup(&backend, TaskOutput::new(dir.path(), "sub-01_run-1"))
        .unwrap();

    let mut exp = RecordingSurface::new(800, 600);
    let mut yields = 0;
    while task.tick(&mut exp, None).unwrap() == TickResult::Yield {
        yields += 1;
    }

    // Episode ends of the emulator do not stop a replay.
    assert_eq!(yields, 3);
    assert_eq!(task.frames(), 3);
    assert_eq!(exp.images().len(), 3);

    let log = backend.log();
    let log = log.lock().unwrap();
    assert_eq!(log.actions.len(), 3);
    for actions in &log.actions {
        assert_eq!(actions.len(), 24);
        assert!(actions[4]);
        assert!(actions[23]);
        assert!(!actions[11]);
    }
    assert!(log.movies.is_empty());
}

#[test]
fn emulator_starts_from_movie_state() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript::default()).with_movie(two_player_movie(1));
    let mut task = VideoGameReplay::new(
        &path,
        "Game",
        Some("scenario.json".into()),
        TaskConfig::default(),
    )
    .unwrap();
    task.setup(&backend, TaskOutput::new(dir.path(), "run")).unwrap();

    let log = backend.log();
    let log = log.lock().unwrap();
    assert_eq!(log.settings[0].state, InitialState::Empty);
    assert_eq!(log.settings[0].players, 2);
    assert!(!log.settings[0].record);
    assert_eq!(log.settings[0].scenario.as_deref(), Some("scenario.json"));
    assert_eq!(log.initial_state, Some(vec![1, 2, 3]));
    assert_eq!(log.resets, 1);
}

#[test]
fn logs_start_and_rewards() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript {
        episode_len: 10,
        rewards: vec![2.5, 0.0, 1.5],
        ..Default::default()
    })
    .with_movie(two_player_movie(3));
    let mut task = VideoGameReplay::new(&path, "Game", None, TaskConfig::default()).unwrap();
    task.setup(&backend, TaskOutput::new(dir.path(), "run")).unwrap();

    let mut exp = RecordingSurface::new(800, 600);
    while task.tick(&mut exp, None).unwrap() == TickResult::Yield {}

    let logs = exp.logs();
    assert_eq!(logs.len(), 3);
    assert!(logs[0].starts_with("VideoGameReplay Game starting at "));
    assert_eq!(logs[1], "Reward 2.500000");
    assert_eq!(logs[2], "Reward 4.000000");
    assert_eq!(task.total_reward(), 4.0);
}

#[test]
fn empty_movie_finishes_immediately() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript::default()).with_movie(two_player_movie(0));
    let mut task = VideoGameReplay::new(&path, "Game", None, TaskConfig::default()).unwrap();
    task.setup(&backend, TaskOutput::new(dir.path(), "run")).unwrap();

    let mut exp = RecordingSurface::new(800, 600);
    assert_eq!(task.tick(&mut exp, None).unwrap(), TickResult::Finished);
    assert!(exp.images().is_empty());
}

#[test]
fn unreadable_movie_fails_setup() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript::default());
    let mut task = VideoGameReplay::new(&path, "Game", None, TaskConfig::default()).unwrap();
    let err = task
        .setup(&backend, TaskOutput::new(dir.path(), "run"))
        .unwrap_err();
    assert!(err.to_string().contains("failed to open movie"));
}

#[test]
fn stop_and_unload_release_resources() {
    let (dir, path) = movie_file();
    let backend = MockBackend::new(MockScript::default()).with_movie(two_player_movie(5));
    let mut task = VideoGameReplay::new(&path, "Game", None, TaskConfig::default()).unwrap();
    task.setup(&backend, TaskOutput::new(dir.path(), "run")).unwrap();

    let mut exp = RecordingSurface::new(800, 600);
    task.tick(&mut exp, None).unwrap();
    let stream = task.audio_stream().unwrap();

    task.stop();
    task.unload();
    assert!(stream.next_block().is_none());
    assert!(backend.log().lock().unwrap().closed);
    assert!(task.tick(&mut exp, None).is_err());
}
