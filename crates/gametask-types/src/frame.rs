//! Pixel buffers exchanged between the emulator and the display surfaces.

/// Raw emulator output for one step: `height` rows of `width * channels`
/// bytes, row 0 first as the emulator renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub pixels: Vec<u8>,
}

impl Observation {
    pub fn new(width: usize, height: usize, channels: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * channels);
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Byte count implied by the dimensions.
    pub fn expected_len(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// Whether `pixels` holds exactly `expected_len` bytes. Fields are public,
    /// so an observation built without `new` may not.
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    /// Borrow a single row of pixels.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.pixels[y * stride..(y + 1) * stride]
    }
}

/// Display-ready image with channel values in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub pixels: Vec<f32>,
}

impl ImageFrame {
    /// Borrow a single row of pixels.
    pub fn row(&self, y: usize) -> &[f32] {
        let stride = self.width * self.channels;
        &self.pixels[y * stride..(y + 1) * stride]
    }
}
