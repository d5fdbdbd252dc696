// Click tone - synthesized metronome click
// Pre-generates the accent and normal click buffers once so the audio
// callback only copies samples

use std::f32::consts::PI;

/// Pre-rendered click buffers, one per click identity.
///
/// The accented click is a higher-pitched burst of the same length and
/// level: 800 Hz vs 400 Hz, 100 ms, linear decay.
#[derive(Debug, Clone)]
pub struct ClickTone {
    accent_samples: Vec<f32>,
    normal_samples: Vec<f32>,
}

impl ClickTone {
    const DURATION_SECS: f32 = 0.1;
    const ACCENT_HZ: f32 = 800.0;
    const NORMAL_HZ: f32 = 400.0;
    const AMPLITUDE: f32 = 0.5;

    pub fn new(sample_rate: f32) -> Self {
        let num_samples = (Self::DURATION_SECS * sample_rate) as usize;
        Self {
            accent_samples: Self::render(sample_rate, num_samples, Self::ACCENT_HZ),
            normal_samples: Self::render(sample_rate, num_samples, Self::NORMAL_HZ),
        }
    }

    /// Sine burst with a linear fade-out over the full click length.
    fn render(sample_rate: f32, num_samples: usize, frequency: f32) -> Vec<f32> {
        let mut samples = Vec::with_capacity(num_samples);
        let phase_increment = 2.0 * PI * frequency / sample_rate;

        for i in 0..num_samples {
            let envelope = 1.0 - i as f32 / num_samples as f32;
            let phase = i as f32 * phase_increment;
            samples.push(phase.sin() * envelope * Self::AMPLITUDE);
        }

        samples
    }

    pub fn samples(&self, accented: bool) -> &[f32] {
        if accented {
            &self.accent_samples
        } else {
            &self.normal_samples
        }
    }

    /// Click length in samples.
    pub fn click_len(&self) -> usize {
        self.accent_samples.len()
    }
}

/// Playback cursor over the active click.
///
/// At most one click sounds at a time; retriggering restarts the new click
/// from the top, replacing whatever was still decaying.
#[derive(Debug, Clone)]
pub struct ClickPlayer {
    tone: ClickTone,
    active: Option<ActiveClick>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveClick {
    accented: bool,
    position: usize,
}

impl ClickPlayer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            tone: ClickTone::new(sample_rate),
            active: None,
        }
    }

    /// Begin (or restart) a click.
    pub fn trigger(&mut self, accented: bool) {
        self.active = Some(ActiveClick {
            accented,
            position: 0,
        });
    }

    /// Next mono output sample; 0.0 while idle.
    pub fn next_sample(&mut self) -> f32 {
        if let Some(ref mut click) = self.active {
            let samples = self.tone.samples(click.accented);
            if click.position < samples.len() {
                let sample = samples[click.position];
                click.position += 1;
                return sample;
            }
            self.active = None;
        }
        0.0
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
}
