use std::sync::Arc;

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, Stream, StreamConfig};

use crate::block::CHANNELS;
use crate::block_stream::AudioBlockStream;
use crate::reader::BlockReader;

/// Plays an [`AudioBlockStream`] on the default output device.
pub struct CpalOutput {
    _stream: Stream,
}

impl CpalOutput {
    /// Open the default output device and start pulling from `blocks`.
    pub fn start(blocks: Arc<AudioBlockStream>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no audio output device available"))?;

        let config = StreamConfig {
            channels: CHANNELS as u16,
            sample_rate: SampleRate(blocks.sample_rate()),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut reader = BlockReader::new(blocks);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    reader.fill(data);
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| anyhow!("failed to open audio output: {e}"))?;
        stream
            .play()
            .map_err(|e| anyhow!("failed to start audio output: {e}"))?;

        log::info!(
            "audio output on {} at {} Hz",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config.sample_rate.0
        );
        Ok(Self { _stream: stream })
    }
}
