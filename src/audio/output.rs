// Click output - CPAL stream for the synthesized click
//
// The engine side holds a ClickHandle and pushes fire-and-forget triggers
// into a lock-free ring buffer; the audio callback drains triggers and plays
// at most one click at a time. No allocation, I/O, or blocking lock happens
// inside the callback.
//
// Note: on macOS (CoreAudio) the Stream is not Send, so the stream stays
// with ClickOutput on the thread that created it while the Send-able
// ClickHandle crosses into the engine.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::Mutex;

use crate::audio::click::ClickPlayer;
use crate::audio::sink::SoundSink;
use crate::messaging::channels::{ClickConsumer, ClickProducer, create_click_channel};
use crate::messaging::command::ClickTrigger;

/// Triggers queued faster than the callback drains them are dropped; a burst
/// larger than this would be inaudible anyway.
const CLICK_RINGBUFFER_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,

    #[error("unsupported sample format: {0:?} (supported: F32, I16, U16)")]
    UnsupportedFormat(SampleFormat),

    #[error("stream configuration error: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Owns the output stream. Keep this alive for as long as clicks should
/// sound; dropping it tears the stream down.
pub struct ClickOutput {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
}

/// Sending half of the click path, handed to the scheduler as its sink.
pub struct ClickHandle {
    triggers: Mutex<ClickProducer>,
}

impl ClickOutput {
    /// Open the default output device and start a stream playing queued
    /// clicks. Returns the stream owner and the engine-side handle.
    pub fn new() -> Result<(Self, ClickHandle), AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        println!(
            "Audio device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        let (trigger_tx, trigger_rx) = create_click_channel(CLICK_RINGBUFFER_CAPACITY);
        let player = ClickPlayer::new(sample_rate);

        let stream = match sample_format {
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, channels, trigger_rx, player)
            }
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, channels, trigger_rx, player)
            }
            SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config, channels, trigger_rx, player)
            }
            other => return Err(AudioError::UnsupportedFormat(other)),
        }?;

        stream.play()?;

        Ok((
            Self {
                _device: device,
                _stream: stream,
                sample_rate,
            },
            ClickHandle {
                triggers: Mutex::new(trigger_tx),
            },
        ))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        mut trigger_rx: ClickConsumer,
        mut player: ClickPlayer,
    ) -> Result<Stream, AudioError>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Latest trigger wins; the player restarts on each one.
                while let Some(trigger) = ringbuf::traits::Consumer::try_pop(&mut trigger_rx) {
                    player.trigger(trigger.accented);
                }

                for frame in data.chunks_mut(channels) {
                    let value = player.next_sample();
                    for sample in frame.iter_mut() {
                        *sample = T::from_sample(value);
                    }
                }
            },
            move |err| {
                eprintln!("Audio stream error: {}", err);
            },
            None,
        )?;

        Ok(stream)
    }
}

impl SoundSink for ClickHandle {
    fn play_click(&self, accented: bool) {
        // try_lock: the tick path must never block on the audio side.
        if let Ok(mut triggers) = self.triggers.try_lock() {
            if ringbuf::traits::Producer::try_push(&mut *triggers, ClickTrigger { accented })
                .is_err()
            {
                // Full buffer - the click is dropped, not retried.
                eprintln!("Warning: click buffer full, click dropped");
            }
        }
    }
}
