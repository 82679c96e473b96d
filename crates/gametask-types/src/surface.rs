use anyhow::Result;

use crate::frame::ImageFrame;

/// Centered text stimulus, as used by the instruction screens.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStim {
    pub text: String,
    /// Line wrap width in the surface's height units.
    pub wrap_width: f32,
}

impl TextStim {
    pub fn new(text: impl Into<String>, wrap_width: f32) -> Self {
        Self {
            text: text.into(),
            wrap_width,
        }
    }
}

/// A presentation window the task draws into once per refresh.
/// Implementations: the experiment and control windows of the presentation
/// toolkit, RecordingSurface (testing).
///
/// Draw calls queue work for the next flip and must not block.
pub trait Surface {
    /// Window size in pixels.
    fn size(&self) -> (u32, u32);

    /// Queue a full-window image for the next flip.
    fn draw_image(&mut self, image: &ImageFrame) -> Result<()>;

    /// Queue a text stimulus for the next flip.
    fn draw_text(&mut self, text: &TextStim) -> Result<()>;

    /// Record an experiment event stamped with the time of the next flip.
    ///
    /// Surfaces without flip timestamps log immediately.
    fn log_on_flip(&mut self, message: String) {
        log::info!(target: "exp", "{message}");
    }
}
