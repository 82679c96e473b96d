use anyhow::Result;
use gametask_types::{Surface, TextStim};

use crate::task::TickResult;

/// Text shown on both windows for a fixed number of frames before a run.
pub struct InstructionScreen {
    text: TextStim,
    frames: u32,
    shown: u32,
}

impl InstructionScreen {
    pub fn new(text: impl Into<String>, wrap_width: f32, frames: u32) -> Self {
        Self {
            text: TextStim::new(text, wrap_width),
            frames,
            shown: 0,
        }
    }

    /// Draw one frame of the instructions. Finishes after `frames` draws.
    pub fn tick(
        &mut self,
        exp: &mut dyn Surface,
        ctl: Option<&mut dyn Surface>,
    ) -> Result<TickResult> {
        if self.shown >= self.frames {
            return Ok(TickResult::Finished);
        }
        exp.draw_text(&self.text)?;
        if let Some(ctl) = ctl {
            ctl.draw_text(&self.text)?;
        }
        self.shown += 1;
        Ok(TickResult::Yield)
    }

    pub fn text(&self) -> &str {
        &self.text.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametask_types::mock::RecordingSurface;

    #[test]
    fn test_shown_for_configured_frames() {
        let mut screen = InstructionScreen::new("Hello", 1.2, 3);
        let mut exp = RecordingSurface::new(800, 600);
        let mut ctl = RecordingSurface::new(800, 600);

        let mut yields = 0;
        while screen.tick(&mut exp, Some(&mut ctl)).unwrap() == TickResult::Yield {
            yields += 1;
        }
        assert_eq!(yields, 3);
        assert_eq!(exp.texts(), vec!["Hello"; 3]);
        assert_eq!(ctl.texts().len(), 3);
    }

    #[test]
    fn test_zero_frames_finishes_immediately() {
        let mut screen = InstructionScreen::new("Hello", 1.2, 0);
        let mut exp = RecordingSurface::new(800, 600);
        assert_eq!(screen.tick(&mut exp, None).unwrap(), TickResult::Finished);
        assert!(exp.commands().is_empty());
    }
}
