use crate::announcer::{Announcer, Cue};
use crate::config::{CadenceTier, Preset, SessionConfig};
use crate::moves::{combo_phrase, random_tip, Combo, ComboCaller};
use crate::schedule::ComboSchedule;

/// Seconds counted down before every round.
pub const PRE_COUNTDOWN_SECS: u32 = 3;
/// Rest between rounds; a fixed constant, independent of round duration.
pub const REST_SECS: u32 = 15;

pub const COMPLETION_PHRASE: &str = "Session complete. Good work!";

/// One mutually-exclusive state of the session timeline. Exactly one phase
/// is active at any instant; every transition goes through `Session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PreCountdown { seconds_left: u32 },
    RoundActive { seconds_left: u32, combo: Combo },
    Rest { seconds_left: u32 },
    Completed,
    EarlyExit,
}

impl Phase {
    /// True for the phases driven by the tick source. `end_early` and
    /// `acknowledge` leave this set, which is what stops further ticks from
    /// being delivered to the session.
    pub fn is_ticking(&self) -> bool {
        matches!(
            self,
            Phase::PreCountdown { .. } | Phase::RoundActive { .. } | Phase::Rest { .. }
        )
    }

    pub fn seconds_left(&self) -> Option<u32> {
        match self {
            Phase::PreCountdown { seconds_left }
            | Phase::RoundActive { seconds_left, .. }
            | Phase::Rest { seconds_left } => Some(*seconds_left),
            Phase::Idle | Phase::Completed | Phase::EarlyExit => None,
        }
    }
}

/// Read-only view consumed by the renderer on every tick.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: &'a Phase,
    pub seconds_left: Option<u32>,
    pub current_round: u32,
    pub session_rounds: u32,
    pub current_combo: Option<&'a Combo>,
    pub combo_history: &'a [Combo],
    pub tip: &'static str,
}

/// The session clock: owns the configuration, the current phase, and the
/// round counter, and coordinates combo calls and announcements against the
/// 1-second tick schedule.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    preset: Option<Preset>,
    phase: Phase,
    current_round: u32,
    caller: ComboCaller,
    schedule: ComboSchedule,
    tip: &'static str,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            preset: None,
            phase: Phase::Idle,
            current_round: 0,
            caller: ComboCaller::new(),
            schedule: ComboSchedule::idle(),
            tip: random_tip(),
        }
    }

    // --- commands -------------------------------------------------------

    /// Starts a session. No-op unless idle with a complete configuration.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle || !self.config.is_complete() {
            return;
        }
        self.caller.clear();
        self.schedule = ComboSchedule::idle();
        self.current_round = 1;
        self.phase = Phase::PreCountdown {
            seconds_left: PRE_COUNTDOWN_SECS,
        };
    }

    /// Aborts the session from any counting phase, discarding the round in
    /// progress. No-op otherwise.
    pub fn end_early(&mut self) {
        if self.phase.is_ticking() {
            self.phase = Phase::EarlyExit;
        }
    }

    /// Ends training from the idle screen: announces completion without any
    /// round having run. No-op outside idle.
    pub fn end_from_idle(&mut self, announcer: &mut dyn Announcer) {
        if self.phase != Phase::Idle {
            return;
        }
        announcer.cue(Cue::SessionEnd);
        announcer.say(COMPLETION_PHRASE);
        self.phase = Phase::Completed;
    }

    /// Dismisses the completion or early-exit screen, clearing combo,
    /// history, and round counter.
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, Phase::Completed | Phase::EarlyExit) {
            self.caller.clear();
            self.schedule = ComboSchedule::idle();
            self.current_round = 0;
            self.phase = Phase::Idle;
        }
    }

    /// Re-speaks the current combo on demand. No-op outside an active round.
    pub fn repeat_combo(&self, announcer: &mut dyn Announcer) {
        if let Phase::RoundActive { ref combo, .. } = self.phase {
            announcer.say(&format!("Combo: {}", combo_phrase(combo)));
        }
    }

    // --- configuration --------------------------------------------------

    /// Replaces the whole configuration with a preset bundle and locks the
    /// bundled fields until `clear_preset`. Only available while idle.
    pub fn apply_preset(&mut self, preset: Preset) {
        if self.phase != Phase::Idle {
            return;
        }
        self.config = preset.session_config();
        self.preset = Some(preset);
    }

    /// Unlocks manual adjustment, retaining the preset's last values.
    pub fn clear_preset(&mut self) {
        if self.phase == Phase::Idle {
            self.preset = None;
        }
    }

    pub fn set_cadence(&mut self, tier: CadenceTier) {
        if self.can_adjust() {
            self.config.combo_cadence_secs = tier.secs();
        }
    }

    pub fn set_move_count(&mut self, count: u32) {
        if self.can_adjust() && count > 0 {
            self.config.move_count = count;
        }
    }

    pub fn set_round_duration(&mut self, secs: u32) {
        if self.can_adjust() && secs > 0 {
            self.config.round_duration_secs = secs;
        }
    }

    pub fn set_session_rounds(&mut self, rounds: u32) {
        if self.can_adjust() && rounds > 0 {
            self.config.session_rounds = rounds;
        }
    }

    fn can_adjust(&self) -> bool {
        self.phase == Phase::Idle && self.preset.is_none()
    }

    // --- clock ----------------------------------------------------------

    /// Advances the session by one second. Must only be called while
    /// `is_ticking()`; a tick landing anywhere else is a scheduling bug.
    pub fn on_tick(&mut self, announcer: &mut dyn Announcer) {
        match &mut self.phase {
            Phase::PreCountdown { seconds_left } => {
                if *seconds_left > 1 {
                    *seconds_left -= 1;
                } else {
                    self.begin_round(announcer);
                }
            }
            Phase::RoundActive { seconds_left, .. } => {
                let remaining = *seconds_left - 1;
                if remaining == 0 {
                    self.finish_round(announcer);
                } else if self.schedule.fires_at(remaining) {
                    self.inject_combo(remaining, announcer);
                } else {
                    *seconds_left = remaining;
                }
            }
            Phase::Rest { seconds_left } => {
                let remaining = *seconds_left - 1;
                if remaining == 0 {
                    self.current_round += 1;
                    self.phase = Phase::PreCountdown {
                        seconds_left: PRE_COUNTDOWN_SECS,
                    };
                } else {
                    *seconds_left = remaining;
                }
            }
            Phase::Idle | Phase::Completed | Phase::EarlyExit => {
                unreachable!("tick delivered while the session is not counting down")
            }
        }
    }

    fn begin_round(&mut self, announcer: &mut dyn Announcer) {
        let combo = self.caller.call(self.config.move_count as usize);
        announcer.say(&format!("Round {}.", self.current_round));
        announcer.say(&format!("Combo: {}", combo_phrase(&combo)));
        self.tip = random_tip();
        self.schedule = ComboSchedule::for_round(
            self.config.round_duration_secs,
            self.config.combo_cadence_secs,
        );
        self.phase = Phase::RoundActive {
            seconds_left: self.config.round_duration_secs,
            combo,
        };
    }

    fn inject_combo(&mut self, remaining: u32, announcer: &mut dyn Announcer) {
        let combo = self.caller.call(self.config.move_count as usize);
        announcer.say(&format!("Combo: {}", combo_phrase(&combo)));
        self.schedule.advance();
        self.phase = Phase::RoundActive {
            seconds_left: remaining,
            combo,
        };
    }

    // Announcements fire before the new phase becomes observable.
    fn finish_round(&mut self, announcer: &mut dyn Announcer) {
        self.schedule = ComboSchedule::idle();
        if self.current_round >= self.config.session_rounds {
            announcer.cue(Cue::SessionEnd);
            announcer.say(COMPLETION_PHRASE);
            self.phase = Phase::Completed;
        } else {
            announcer.cue(Cue::RoundEnd);
            announcer.say(&format!("Rest {REST_SECS} seconds"));
            self.phase = Phase::Rest {
                seconds_left: REST_SECS,
            };
        }
    }

    // --- views ----------------------------------------------------------

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_ticking(&self) -> bool {
        self.phase.is_ticking()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn session_rounds(&self) -> u32 {
        self.config.session_rounds
    }

    pub fn current_combo(&self) -> Option<&Combo> {
        match &self.phase {
            Phase::RoundActive { combo, .. } => Some(combo),
            _ => None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: &self.phase,
            seconds_left: self.phase.seconds_left(),
            current_round: self.current_round,
            session_rounds: self.config.session_rounds,
            current_combo: self.current_combo(),
            combo_history: self.caller.history(),
            tip: self.tip,
        }
    }
}
