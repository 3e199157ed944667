use crate::audio::{round_end_beep, session_end_bell, CueMixer};
use clap::ValueEnum;
use tts::Tts;

/// Audio cue identifiers played at phase boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    RoundEnd,
    SessionEnd,
}

/// Fire-and-forget seam between the session clock and the audio/speech
/// backends. Implementations must never block a tick and never surface
/// backend failures to the caller: a failed announcement leaves the session
/// running mutely, nothing else.
pub trait Announcer {
    fn cue(&mut self, cue: Cue);
    fn say(&mut self, text: &str);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum VoiceGender {
    Female,
    Male,
}

/// Narration settings, consulted on every `say` call.
#[derive(Debug, Clone, Copy)]
pub struct VoiceConfig {
    pub gender: VoiceGender,
    /// 0-100; values above 100 are treated as 100.
    pub volume_percent: u32,
}

impl VoiceConfig {
    pub fn volume(&self) -> f32 {
        self.volume_percent.min(100) as f32 / 100.0
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            gender: VoiceGender::Female,
            volume_percent: 100,
        }
    }
}

/// Production announcer: synthesized cue tones through rodio and narration
/// through the platform speech engine. Either backend may be missing; the
/// corresponding announcements then no-op.
pub struct AudioAnnouncer {
    pub cues_enabled: bool,
    pub voice_enabled: bool,
    pub voice: VoiceConfig,
    mixer: Option<CueMixer>,
    narrator: Option<Tts>,
}

impl AudioAnnouncer {
    pub fn new(voice: VoiceConfig) -> Self {
        Self {
            cues_enabled: true,
            voice_enabled: true,
            voice,
            mixer: CueMixer::try_default(),
            narrator: Tts::default().ok(),
        }
    }

    /// An announcer with no backends attached. Behaves like `new()` on a
    /// host without audio or speech capability.
    pub fn detached(voice: VoiceConfig) -> Self {
        Self {
            cues_enabled: true,
            voice_enabled: true,
            voice,
            mixer: None,
            narrator: None,
        }
    }

    pub fn toggle_cues(&mut self) {
        self.cues_enabled = !self.cues_enabled;
    }

    pub fn toggle_voice(&mut self) {
        self.voice_enabled = !self.voice_enabled;
    }
}

impl Announcer for AudioAnnouncer {
    fn cue(&mut self, cue: Cue) {
        if !self.cues_enabled {
            return;
        }
        if let Some(ref mixer) = self.mixer {
            let samples = match cue {
                Cue::RoundEnd => round_end_beep(),
                Cue::SessionEnd => session_end_bell(),
            };
            mixer.play(samples);
        }
    }

    fn say(&mut self, text: &str) {
        if !self.voice_enabled || text.trim().is_empty() {
            return;
        }
        let voice = self.voice;
        if let Some(ref mut tts) = self.narrator {
            apply_voice(tts, voice);
            // queued rather than interrupting; overlapping phrases are an
            // accepted limitation of the shared speech engine
            let _ = tts.speak(text.to_string(), false);
        }
    }
}

// Every speech-engine failure is swallowed here; narration is best-effort.
fn apply_voice(tts: &mut Tts, voice: VoiceConfig) {
    let features = tts.supported_features();

    if features.volume {
        let min = tts.min_volume();
        let max = tts.max_volume();
        let _ = tts.set_volume(min + (max - min) * voice.volume());
    }

    if features.pitch {
        let normal = tts.normal_pitch();
        let pitch = match voice.gender {
            VoiceGender::Female => normal + (tts.max_pitch() - normal) * 0.3,
            VoiceGender::Male => normal - (normal - tts.min_pitch()) * 0.3,
        };
        let _ = tts.set_pitch(pitch);
    }

    if features.voice {
        if let Ok(voices) = tts.voices() {
            let wanted = match voice.gender {
                VoiceGender::Female => tts::Gender::Female,
                VoiceGender::Male => tts::Gender::Male,
            };
            let preferred = voices
                .iter()
                .find(|v| v.gender() == Some(wanted))
                .or_else(|| voices.first());
            if let Some(v) = preferred {
                let _ = tts.set_voice(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_percent_is_clamped() {
        let voice = VoiceConfig {
            gender: VoiceGender::Male,
            volume_percent: 250,
        };
        assert_eq!(voice.volume(), 1.0);

        let muted = VoiceConfig {
            volume_percent: 0,
            ..VoiceConfig::default()
        };
        assert_eq!(muted.volume(), 0.0);
    }

    #[test]
    fn detached_announcer_swallows_everything() {
        let mut announcer = AudioAnnouncer::detached(VoiceConfig::default());
        announcer.cue(Cue::RoundEnd);
        announcer.cue(Cue::SessionEnd);
        announcer.say("Round 1.");
        announcer.say("");
        announcer.say("   ");
    }

    #[test]
    fn toggles_flip_independently() {
        let mut announcer = AudioAnnouncer::detached(VoiceConfig::default());
        announcer.toggle_cues();
        assert!(!announcer.cues_enabled);
        assert!(announcer.voice_enabled);

        announcer.toggle_voice();
        assert!(!announcer.voice_enabled);

        announcer.toggle_cues();
        assert!(announcer.cues_enabled);
    }
}
