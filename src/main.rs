use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use spar::announcer::{AudioAnnouncer, VoiceConfig, VoiceGender};
use spar::config::{
    CadenceTier, Preset, SessionConfig, DURATION_CHOICES, MOVE_COUNT_CHOICES, ROUND_CHOICES,
};
use spar::runtime::{CrosstermEventSource, FixedTicker, Runner, SparEvent};
use spar::session::{Phase, Session};
use spar::ui::SessionView;

const TICK_RATE_MS: u64 = 1000;

/// shadowboxing round timer with spoken combos
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A shadowboxing round timer that counts rounds and rest periods, calls out randomized move combinations on a cadence, and narrates everything through your speakers."
)]
pub struct Cli {
    /// moves per combo (1-4)
    #[clap(short = 'm', long, default_value_t = 1, value_parser = parse_move_count)]
    moves: u32,

    /// round duration in seconds (30, 60, 90, or 120)
    #[clap(short = 'd', long, default_value_t = 30, value_parser = parse_duration)]
    duration: u32,

    /// rounds per session (2-5)
    #[clap(short = 'r', long, default_value_t = 2, value_parser = parse_rounds)]
    rounds: u32,

    /// how often fresh combos are called during a round
    #[clap(short = 'c', long, value_enum, default_value_t = CadenceTier::Normal)]
    cadence: CadenceTier,

    /// intensity preset; overrides moves/duration/rounds/cadence and locks them
    #[clap(short = 'p', long, value_enum)]
    preset: Option<Preset>,

    /// disable the round and session audio cues
    #[clap(long)]
    no_cues: bool,

    /// disable spoken narration
    #[clap(long)]
    no_voice: bool,

    /// narration voice preference
    #[clap(long, value_enum, default_value_t = VoiceGender::Female)]
    voice: VoiceGender,

    /// narration volume, 0-100
    #[clap(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(0..=100))]
    voice_volume: u32,
}

fn parse_move_count(s: &str) -> Result<u32, String> {
    parse_choice(s, &MOVE_COUNT_CHOICES)
}

fn parse_duration(s: &str) -> Result<u32, String> {
    parse_choice(s, &DURATION_CHOICES)
}

fn parse_rounds(s: &str) -> Result<u32, String> {
    parse_choice(s, &ROUND_CHOICES)
}

fn parse_choice(s: &str, choices: &[u32]) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if choices.contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be one of {choices:?}"))
    }
}

impl Cli {
    fn to_session(&self) -> Session {
        let mut session = Session::new(SessionConfig {
            move_count: self.moves,
            round_duration_secs: self.duration,
            session_rounds: self.rounds,
            combo_cadence_secs: self.cadence.secs(),
        });
        if let Some(preset) = self.preset {
            session.apply_preset(preset);
        }
        session
    }

    fn to_announcer(&self) -> AudioAnnouncer {
        let mut announcer = AudioAnnouncer::new(VoiceConfig {
            gender: self.voice,
            volume_percent: self.voice_volume,
        });
        announcer.cues_enabled = !self.no_cues;
        announcer.voice_enabled = !self.no_voice;
        announcer
    }
}

pub struct App {
    pub session: Session,
    pub announcer: AudioAnnouncer,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        Self {
            session: cli.to_session(),
            announcer: cli.to_announcer(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            SparEvent::Tick => {
                // ticks only reach the clock while a phase is counting down;
                // this gate is what cancels stale ticks after an early exit
                if app.session.is_ticking() {
                    app.session.on_tick(&mut app.announcer);
                }
            }
            SparEvent::Resize => {}
            SparEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    let session = &mut app.session;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => match session.phase() {
            Phase::Idle => return true,
            Phase::Completed | Phase::EarlyExit => session.acknowledge(),
            _ => session.end_early(),
        },
        KeyCode::Enter | KeyCode::Char(' ') => match session.phase() {
            Phase::Idle => session.start(),
            Phase::Completed | Phase::EarlyExit => session.acknowledge(),
            _ => {}
        },
        KeyCode::Char('s') => session.start(),
        KeyCode::Char('e') => session.end_early(),
        KeyCode::Char('x') => session.end_from_idle(&mut app.announcer),
        KeyCode::Char('r') => session.repeat_combo(&mut app.announcer),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            session.apply_preset(Preset::ALL[idx]);
        }
        KeyCode::Char('c') => session.clear_preset(),
        KeyCode::Char('m') => {
            let next = next_choice(&MOVE_COUNT_CHOICES, session.config().move_count);
            session.set_move_count(next);
        }
        KeyCode::Char('d') => {
            let next = next_choice(&DURATION_CHOICES, session.config().round_duration_secs);
            session.set_round_duration(next);
        }
        KeyCode::Char('o') => {
            let next = next_choice(&ROUND_CHOICES, session.config().session_rounds);
            session.set_session_rounds(next);
        }
        KeyCode::Char('t') => {
            session.set_cadence(next_tier(session.config().combo_cadence_secs));
        }
        KeyCode::Char('a') => app.announcer.toggle_cues(),
        KeyCode::Char('v') => app.announcer.toggle_voice(),
        _ => {}
    }

    false
}

/// Next value in a settings choice list, wrapping around; unknown current
/// values land on the first choice.
fn next_choice(choices: &[u32], current: u32) -> u32 {
    match choices.iter().position(|&c| c == current) {
        Some(idx) => choices[(idx + 1) % choices.len()],
        None => choices[0],
    }
}

fn next_tier(current_secs: u32) -> CadenceTier {
    let tiers = CadenceTier::ALL;
    match tiers.iter().position(|t| t.secs() == current_secs) {
        Some(idx) => tiers[(idx + 1) % tiers.len()],
        None => tiers[0],
    }
}

fn ui(app: &App, f: &mut Frame) {
    let view = SessionView {
        session: &app.session,
        cues_enabled: app.announcer.cues_enabled,
        voice_enabled: app.announcer.voice_enabled,
    };
    f.render_widget(&view, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_cycling_wraps() {
        assert_eq!(next_choice(&DURATION_CHOICES, 30), 60);
        assert_eq!(next_choice(&DURATION_CHOICES, 120), 30);
        assert_eq!(next_choice(&DURATION_CHOICES, 45), 30);
    }

    #[test]
    fn tier_cycling_follows_the_tier_order() {
        assert_eq!(next_tier(CadenceTier::Slow.secs()), CadenceTier::Normal);
        assert_eq!(next_tier(CadenceTier::Extreme.secs()), CadenceTier::Slow);
        assert_eq!(next_tier(0), CadenceTier::Slow);
    }

    #[test]
    fn cli_defaults_build_a_startable_session() {
        let cli = Cli::parse_from(["spar"]);
        let session = cli.to_session();
        assert!(session.config().is_complete());
        assert_eq!(session.config().move_count, 1);
        assert_eq!(session.config().round_duration_secs, 30);
        assert_eq!(session.config().session_rounds, 2);
        assert_eq!(session.config().combo_cadence_secs, 10);
    }

    #[test]
    fn cli_preset_locks_the_bundle() {
        let cli = Cli::parse_from(["spar", "--preset", "hard"]);
        let session = cli.to_session();
        assert_eq!(*session.config(), Preset::Hard.session_config());
        assert_eq!(session.preset(), Some(Preset::Hard));
    }

    #[test]
    fn cli_rejects_values_outside_the_choice_sets() {
        assert!(Cli::try_parse_from(["spar", "--duration", "45"]).is_err());
        assert!(Cli::try_parse_from(["spar", "--moves", "5"]).is_err());
        assert!(Cli::try_parse_from(["spar", "--rounds", "1"]).is_err());
    }
}
