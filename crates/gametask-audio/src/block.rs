/// Interleaved stereo.
pub const CHANNELS: usize = 2;

/// Full scale of a signed 16-bit sample.
pub const I16_SCALE: f32 = 32768.0;

/// A fixed number of interleaved stereo frames, samples in `-1.0..1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBlock {
    frames: usize,
    samples: Vec<f32>,
}

impl AudioBlock {
    pub fn silence(frames: usize) -> Self {
        Self {
            frames,
            samples: vec![0.0; frames * CHANNELS],
        }
    }

    /// Convert raw emulator output to a block of exactly `frames` frames.
    ///
    /// Extra frames are dropped; a short chunk is padded with silence.
    pub fn from_i16(raw: &[i16], frames: usize) -> Self {
        let wanted = frames * CHANNELS;
        let available = raw.len() - raw.len() % CHANNELS;
        if available < wanted {
            log::warn!(
                "audio chunk short by {} frames, padding with silence",
                (wanted - available) / CHANNELS
            );
        }

        let mut samples: Vec<f32> = raw[..available.min(wanted)]
            .iter()
            .map(|&s| s as f32 / I16_SCALE)
            .collect();
        samples.resize(wanted, 0.0);
        Self { frames, samples }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Left and right sample of frame `i`.
    pub fn frame(&self, i: usize) -> (f32, f32) {
        (self.samples[i * CHANNELS], self.samples[i * CHANNELS + 1])
    }

    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_shape() {
        let block = AudioBlock::silence(735);
        assert_eq!(block.frames(), 735);
        assert_eq!(block.samples().len(), 1470);
        assert!(block.is_silent());
    }

    #[test]
    fn test_from_i16_scales() {
        let block = AudioBlock::from_i16(&[i16::MIN, 16384, 0, -16384], 2);
        assert_eq!(block.frame(0), (-1.0, 0.5));
        assert_eq!(block.frame(1), (0.0, -0.5));
    }

    #[test]
    fn test_from_i16_keeps_leading_frames() {
        // 737 frames from the emulator, 735 kept.
        let raw: Vec<i16> = (0..737 * 2).map(|i| (i % 100) as i16).collect();
        let block = AudioBlock::from_i16(&raw, 735);
        assert_eq!(block.samples().len(), 1470);
        assert_eq!(block.samples()[1469], (1469 % 100) as f32 / I16_SCALE);
    }

    #[test]
    fn test_from_i16_pads_short_chunk() {
        let block = AudioBlock::from_i16(&[32767, 32767, 100], 3);
        assert_eq!(block.samples().len(), 6);
        assert!(block.frame(0).0 > 0.99);
        // Dangling half frame is dropped along with the missing frames.
        assert_eq!(block.frame(1), (0.0, 0.0));
        assert_eq!(block.frame(2), (0.0, 0.0));
    }
}
