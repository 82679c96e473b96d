use std::sync::Arc;

use crate::block::AudioBlock;
use crate::block_stream::AudioBlockStream;

/// Adapts block-sized pulls to device buffers of arbitrary length.
///
/// A block may be split across several device callbacks.
pub struct BlockReader {
    stream: Arc<AudioBlockStream>,
    current: Option<AudioBlock>,
    pos: usize,
}

impl BlockReader {
    pub fn new(stream: Arc<AudioBlockStream>) -> Self {
        Self {
            stream,
            current: None,
            pos: 0,
        }
    }

    /// Fill `out` with interleaved stereo samples. Returns false once the
    /// stream has stopped; the rest of `out` is then zeroed.
    pub fn fill(&mut self, out: &mut [f32]) -> bool {
        let mut written = 0;
        while written < out.len() {
            let exhausted = self
                .current
                .as_ref()
                .is_none_or(|block| self.pos >= block.samples().len());
            if exhausted {
                match self.stream.next_block() {
                    Some(block) => {
                        self.current = Some(block);
                        self.pos = 0;
                    }
                    None => {
                        out[written..].fill(0.0);
                        self.current = None;
                        return false;
                    }
                }
            }

            let Some(block) = self.current.as_ref() else {
                continue;
            };
            let src = &block.samples()[self.pos..];
            let n = src.len().min(out.len() - written);
            out[written..written + n].copy_from_slice(&src[..n]);
            written += n;
            self.pos += n;
        }
        true
    }
}
