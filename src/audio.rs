use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use std::f32::consts::PI;

pub const SAMPLE_RATE: u32 = 44100;

/// Short beep marking the end of a round.
pub fn round_end_beep() -> Vec<f32> {
    tone(&[(880.0, 0.5)], 0.3)
}

/// Bell-like chord marking the end of a session.
pub fn session_end_bell() -> Vec<f32> {
    // C major partials with a slow decay read as a struck bell
    tone(&[(523.25, 0.3), (659.25, 0.25), (783.99, 0.2)], 1.5)
}

fn tone(partials: &[(f32, f32)], duration_secs: f32) -> Vec<f32> {
    let total = (SAMPLE_RATE as f32 * duration_secs) as usize;
    let mut samples = Vec::with_capacity(total);

    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let mut sample = 0.0;
        for &(freq, amplitude) in partials {
            sample += (t * freq * 2.0 * PI).sin() * amplitude;
        }
        samples.push(sample * envelope(t, duration_secs));
    }

    samples
}

// 10ms attack, exponential-ish release over the remainder
fn envelope(t: f32, duration: f32) -> f32 {
    let attack = 0.01;
    if t < attack {
        t / attack
    } else {
        let release = (duration - t) / (duration - attack);
        release.clamp(0.0, 1.0)
    }
}

/// Handle on the default audio output. `None` when the host has no usable
/// output device; cues degrade to no-ops in that case.
pub struct CueMixer {
    _stream: OutputStream,
    sink: Sink,
}

impl CueMixer {
    pub fn try_default() -> Option<Self> {
        let (stream, handle) = OutputStream::try_default().ok()?;
        let sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream: stream,
            sink,
        })
    }

    /// Queues a mono sample buffer; playback happens off the caller's thread.
    pub fn play(&self, samples: Vec<f32>) {
        self.sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_buffers_have_expected_length() {
        assert_eq!(round_end_beep().len(), (SAMPLE_RATE as f32 * 0.3) as usize);
        assert_eq!(
            session_end_bell().len(),
            (SAMPLE_RATE as f32 * 1.5) as usize
        );
    }

    #[test]
    fn cue_samples_stay_in_range() {
        for samples in [round_end_beep(), session_end_bell()] {
            assert!(samples.iter().all(|s| s.abs() <= 1.0));
        }
    }

    #[test]
    fn envelope_ramps_and_releases() {
        assert_eq!(envelope(0.0, 1.0), 0.0);
        assert!((envelope(0.01, 1.0) - 1.0).abs() < f32::EPSILON);
        assert!(envelope(0.99, 1.0) < 0.05);
        assert_eq!(envelope(1.0, 1.0), 0.0);
    }
}
