use clap::ValueEnum;

/// Move counts offered by the interactive settings screen.
pub const MOVE_COUNT_CHOICES: [u32; 4] = [1, 2, 3, 4];
/// Round durations (seconds) offered by the interactive settings screen.
pub const DURATION_CHOICES: [u32; 4] = [30, 60, 90, 120];
/// Session round counts offered by the interactive settings screen.
pub const ROUND_CHOICES: [u32; 4] = [2, 3, 4, 5];

/// How often a fresh combo is called during a round.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum CadenceTier {
    Slow,
    Normal,
    Fast,
    Extreme,
}

impl CadenceTier {
    pub const ALL: [CadenceTier; 4] = [
        CadenceTier::Slow,
        CadenceTier::Normal,
        CadenceTier::Fast,
        CadenceTier::Extreme,
    ];

    /// Seconds between combo calls within a round.
    pub fn secs(self) -> u32 {
        match self {
            CadenceTier::Slow => 15,
            CadenceTier::Normal => 10,
            CadenceTier::Fast => 7,
            CadenceTier::Extreme => 5,
        }
    }
}

/// Named intensity bundle fixing all four session fields at once.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Preset {
    Light,
    Moderate,
    Hard,
    Beast,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Light, Preset::Moderate, Preset::Hard, Preset::Beast];

    /// The cadence tier a preset selects.
    pub fn cadence_tier(self) -> CadenceTier {
        match self {
            Preset::Light => CadenceTier::Slow,
            Preset::Moderate => CadenceTier::Normal,
            Preset::Hard => CadenceTier::Fast,
            Preset::Beast => CadenceTier::Extreme,
        }
    }

    /// The full configuration bundle, applied atomically.
    pub fn session_config(self) -> SessionConfig {
        let (move_count, round_duration_secs, session_rounds) = match self {
            Preset::Light => (1, 30, 2),
            Preset::Moderate => (2, 60, 3),
            Preset::Hard => (3, 90, 4),
            Preset::Beast => (4, 120, 5),
        };
        SessionConfig {
            move_count,
            round_duration_secs,
            session_rounds,
            combo_cadence_secs: self.cadence_tier().secs(),
        }
    }
}

/// Session parameters, immutable from `start()` until the session returns to
/// idle. A zero field means unset; `start()` refuses incomplete configs.
///
/// The fixed choice sets (move count 1-4, duration 30/60/90/120, rounds 2-5)
/// are enforced at the CLI and settings screen; the session core only
/// requires positive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub move_count: u32,
    pub round_duration_secs: u32,
    pub session_rounds: u32,
    pub combo_cadence_secs: u32,
}

impl SessionConfig {
    pub fn is_complete(&self) -> bool {
        self.move_count > 0
            && self.round_duration_secs > 0
            && self.session_rounds > 0
            && self.combo_cadence_secs > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_tier_seconds() {
        assert_eq!(CadenceTier::Slow.secs(), 15);
        assert_eq!(CadenceTier::Normal.secs(), 10);
        assert_eq!(CadenceTier::Fast.secs(), 7);
        assert_eq!(CadenceTier::Extreme.secs(), 5);
    }

    #[test]
    fn preset_bundles_are_complete() {
        for preset in Preset::ALL {
            let cfg = preset.session_config();
            assert!(cfg.is_complete(), "{preset} bundle left a field unset");
            assert_eq!(cfg.combo_cadence_secs, preset.cadence_tier().secs());
        }
    }

    #[test]
    fn preset_fields_come_from_choice_sets() {
        for preset in Preset::ALL {
            let cfg = preset.session_config();
            assert!(MOVE_COUNT_CHOICES.contains(&cfg.move_count));
            assert!(DURATION_CHOICES.contains(&cfg.round_duration_secs));
            assert!(ROUND_CHOICES.contains(&cfg.session_rounds));
        }
    }

    #[test]
    fn harder_presets_call_combos_more_often() {
        let cadences: Vec<u32> = Preset::ALL
            .iter()
            .map(|p| p.cadence_tier().secs())
            .collect();
        assert!(cadences.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn default_config_is_incomplete() {
        assert!(!SessionConfig::default().is_complete());
    }

    #[test]
    fn any_zero_field_is_incomplete() {
        let full = SessionConfig {
            move_count: 2,
            round_duration_secs: 60,
            session_rounds: 3,
            combo_cadence_secs: 10,
        };
        assert!(full.is_complete());

        for zeroed in [
            SessionConfig {
                move_count: 0,
                ..full
            },
            SessionConfig {
                round_duration_secs: 0,
                ..full
            },
            SessionConfig {
                session_rounds: 0,
                ..full
            },
            SessionConfig {
                combo_cadence_secs: 0,
                ..full
            },
        ] {
            assert!(!zeroed.is_complete());
        }
    }
}
