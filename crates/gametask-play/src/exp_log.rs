//! Experiment log lines, written through `Surface::log_on_flip`.

/// Seconds since the Unix epoch, with microsecond resolution.
fn wall_clock_secs() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

pub(crate) fn session_start(game: &str, state: &str) -> String {
    format!("VideoGame {game}: {state} starting at {:.6}", wall_clock_secs())
}

pub(crate) fn replay_start(game: &str) -> String {
    format!("VideoGameReplay {game} starting at {:.6}", wall_clock_secs())
}

pub(crate) fn reward(total: f64) -> String {
    format!("Reward {total:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(line: &str) -> f64 {
        line.rsplit(' ').next().unwrap().parse().unwrap()
    }

    #[test]
    fn test_session_start_carries_wall_clock() {
        let before = wall_clock_secs();
        let line = session_start("Shinobi", "Level1");
        assert!(line.starts_with("VideoGame Shinobi: Level1 starting at "));
        assert!(stamp(&line) >= before - 1e-3);
    }

    #[test]
    fn test_replay_start() {
        let line = replay_start("Shinobi");
        assert!(line.starts_with("VideoGameReplay Shinobi starting at "));
        assert!(stamp(&line) > 1.0e9);
    }

    #[test]
    fn test_reward_line() {
        assert_eq!(reward(150.0), "Reward 150.000000");
    }
}
