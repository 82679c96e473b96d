use std::sync::Arc;

use anyhow::{Result, bail};
use gametask_audio::{AudioBlock, AudioBlockStream, SoundStatus};
use gametask_types::{ImageFrame, Observation, Surface};

/// Display image for an emulator observation: rows flipped vertically and
/// bytes scaled to `0.0..=1.0`. Fails when the pixel buffer does not match
/// the dimensions.
pub fn prepare_image(obs: &Observation) -> Result<ImageFrame> {
    if !obs.is_well_formed() {
        bail!(
            "observation has {} bytes, expected {} for {}x{}x{}",
            obs.pixels.len(),
            obs.expected_len(),
            obs.width,
            obs.height,
            obs.channels
        );
    }
    let mut pixels = Vec::with_capacity(obs.pixels.len());
    for y in (0..obs.height).rev() {
        pixels.extend(obs.row(y).iter().map(|&p| p as f32 / 255.0));
    }
    Ok(ImageFrame {
        width: obs.width,
        height: obs.height,
        channels: obs.channels,
        pixels,
    })
}

/// Pushes one emulator step's picture and sound to the outputs.
pub struct FrameRenderer {
    stream: Arc<AudioBlockStream>,
}

impl FrameRenderer {
    pub fn new(stream: Arc<AudioBlockStream>) -> Self {
        Self { stream }
    }

    /// Draw `obs` on the experiment window (and the control window if
    /// present), queue `raw_audio` and make sure the sound is playing.
    /// A malformed observation is rejected before anything is drawn or queued.
    pub fn render(
        &self,
        obs: &Observation,
        raw_audio: &[i16],
        exp: &mut dyn Surface,
        ctl: Option<&mut dyn Surface>,
    ) -> Result<()> {
        let image = prepare_image(obs)?;
        exp.draw_image(&image)?;
        if let Some(ctl) = ctl {
            ctl.draw_image(&image)?;
        }

        self.stream
            .add_block(AudioBlock::from_i16(raw_audio, self.stream.block_size()));
        if self.stream.status() != SoundStatus::Playing {
            self.stream.play();
        }
        Ok(())
    }

    pub fn stream(&self) -> &Arc<AudioBlockStream> {
        &self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametask_types::mock::RecordingSurface;

    #[test]
    fn test_prepare_image_flips_and_normalizes() {
        // 1x2 RGB: top row black, bottom row white.
        let obs = Observation::new(1, 2, 3, vec![0, 0, 0, 255, 255, 255]);
        let image = prepare_image(&obs).unwrap();
        assert_eq!(image.row(0), &[1.0, 1.0, 1.0]);
        assert_eq!(image.row(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_prepare_image_midtone() {
        let obs = Observation::new(1, 1, 1, vec![51]);
        assert_eq!(prepare_image(&obs).unwrap().pixels, vec![0.2]);
    }

    #[test]
    fn test_render_rejects_short_observation() {
        let stream = Arc::new(AudioBlockStream::new(735, 44100));
        let renderer = FrameRenderer::new(stream.clone());
        let mut exp = RecordingSurface::new(800, 600);
        let mut ctl = RecordingSurface::new(800, 600);
        let obs = Observation {
            width: 4,
            height: 4,
            channels: 3,
            pixels: vec![0; 10],
        };

        let err = renderer
            .render(&obs, &[0; 1600], &mut exp, Some(&mut ctl))
            .unwrap_err();

        assert!(err.to_string().contains("expected 48"));
        assert!(exp.images().is_empty());
        assert!(ctl.images().is_empty());
        assert_eq!(stream.queued(), 0);
        assert_eq!(stream.status(), SoundStatus::NotStarted);
    }

    #[test]
    fn test_render_draws_both_windows_and_starts_sound() {
        let stream = Arc::new(AudioBlockStream::new(735, 44100));
        let renderer = FrameRenderer::new(stream.clone());
        let mut exp = RecordingSurface::new(800, 600);
        let mut ctl = RecordingSurface::new(800, 600);
        let obs = Observation::new(2, 2, 3, vec![128; 12]);

        renderer
            .render(&obs, &[0; 1600], &mut exp, Some(&mut ctl))
            .unwrap();

        assert_eq!(exp.images().len(), 1);
        assert_eq!(ctl.images().len(), 1);
        assert_eq!(stream.queued(), 1);
        assert_eq!(stream.status(), SoundStatus::Playing);
    }

    #[test]
    fn test_render_without_control_window() {
        let stream = Arc::new(AudioBlockStream::new(735, 44100));
        let renderer = FrameRenderer::new(stream.clone());
        let mut exp = RecordingSurface::new(800, 600);
        let obs = Observation::new(1, 1, 3, vec![0; 3]);

        renderer.render(&obs, &[], &mut exp, None).unwrap();
        renderer.render(&obs, &[], &mut exp, None).unwrap();

        assert_eq!(exp.images().len(), 2);
        assert_eq!(stream.queued(), 2);
        assert!(stream.next_block().unwrap().is_silent());
    }
}
