/// Cumulative reward of the current session.
#[derive(Debug, Clone, Default)]
pub struct RewardTracker {
    total: f64,
}

impl RewardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one step's reward. Returns the new total when the step
    /// earned a positive reward, i.e. when it should be logged.
    pub fn add(&mut self, reward: f64) -> Option<f64> {
        self.total += reward;
        (reward > 0.0).then_some(self.total)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
    }
}
