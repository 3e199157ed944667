use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::moves::combo_phrase;
use crate::session::{Phase, Session, Snapshot};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Seconds at which the round countdown switches to the sprint styling.
const SPRINT_STYLE_SECS: u32 = 3;

/// Accent color per move family: punches get hot colors, defensive
/// movement stays cool.
pub fn move_color(mv: &str) -> Color {
    match mv {
        "Jab" => Color::Blue,
        "Cross" => Color::Red,
        "Hook L" | "Hook R" => Color::Rgb(255, 165, 0),
        "Uppercut L" | "Uppercut R" => Color::Magenta,
        _ => Color::Cyan,
    }
}

/// Borrowing view over the session plus the announcer toggles; rendered on
/// every tick.
pub struct SessionView<'a> {
    pub session: &'a Session,
    pub cues_enabled: bool,
    pub voice_enabled: bool,
}

impl Widget for &SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.session.snapshot();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // round header + mute indicators
                Constraint::Min(0),    // phase body
                Constraint::Length(2), // tip footer
            ])
            .split(area);

        self.render_header(&snap, chunks[0], buf);
        self.render_body(&snap, chunks[1], buf);
        render_footer(&snap, chunks[2], buf);
    }
}

impl SessionView<'_> {
    fn render_header(&self, snap: &Snapshot, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let mut spans = Vec::new();
        if snap.current_round > 0 {
            spans.push(Span::styled(
                format!("Round {}/{}", snap.current_round, snap.session_rounds),
                bold,
            ));
            spans.push(Span::raw("  "));
        }
        if !self.cues_enabled {
            spans.push(Span::styled("[cues off] ", dim));
        }
        if !self.voice_enabled {
            spans.push(Span::styled("[voice off]", dim));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_body(&self, snap: &Snapshot, area: Rect, buf: &mut Buffer) {
        match snap.phase {
            Phase::Idle => self.render_idle(area, buf),
            Phase::PreCountdown { seconds_left } => {
                let line = Line::from(Span::styled(
                    format!("{seconds_left}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                render_centered(vec![line], area, buf);
            }
            Phase::RoundActive { seconds_left, combo } => {
                render_round(snap, *seconds_left, combo, area, buf);
            }
            Phase::Rest { seconds_left } => {
                let line = Line::from(Span::styled(
                    format!("Rest {seconds_left}s"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
                render_centered(vec![line], area, buf);
            }
            Phase::Completed => {
                let bold_green = Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD);
                render_centered(
                    vec![
                        Line::from(Span::styled("Good work, Champ!", bold_green)),
                        Line::default(),
                        Line::from(Span::styled(
                            "(enter) back to settings",
                            Style::default().add_modifier(Modifier::DIM),
                        )),
                    ],
                    area,
                    buf,
                );
            }
            Phase::EarlyExit => {
                render_centered(
                    vec![
                        Line::from(Span::styled(
                            "Session ended early",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )),
                        Line::default(),
                        Line::from(Span::styled(
                            "(enter) back to settings",
                            Style::default().add_modifier(Modifier::DIM),
                        )),
                    ],
                    area,
                    buf,
                );
            }
        }
    }

    fn render_idle(&self, area: Rect, buf: &mut Buffer) {
        let config = self.session.config();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let preset_value = match self.session.preset() {
            Some(preset) => format!("{preset} (locked)"),
            None => "custom".to_string(),
        };

        let settings = [
            ("moves per combo", format!("{}", config.move_count)),
            ("round duration", format!("{}s", config.round_duration_secs)),
            ("session rounds", format!("{}", config.session_rounds)),
            ("combo cadence", format!("every {}s", config.combo_cadence_secs)),
            ("preset", preset_value),
        ];
        let label_width = settings
            .iter()
            .map(|(label, _)| label.width())
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            Line::from(Span::styled("spar", bold.fg(Color::Magenta))),
            Line::from(Span::styled("shadowboxing round timer", dim)),
            Line::default(),
        ];
        for (label, value) in settings {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<label_width$}  "), dim),
                Span::styled(value, bold),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "(s)tart  (1-4) preset  (c)lear preset  (m/d/o/t) adjust",
            dim,
        )));
        lines.push(Line::from(Span::styled(
            "(a) cues  (v) voice  (x) end training  (q)uit",
            dim,
        )));

        render_centered(lines, area, buf);
    }
}

fn render_round(
    snap: &Snapshot,
    seconds_left: u32,
    combo: &[&'static str],
    area: Rect,
    buf: &mut Buffer,
) {
    let countdown_style = if seconds_left <= SPRINT_STYLE_SECS {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("{seconds_left}s"), countdown_style)),
        Line::default(),
    ];

    for &mv in combo {
        lines.push(Line::from(Span::styled(
            mv,
            Style::default()
                .fg(move_color(mv))
                .add_modifier(Modifier::BOLD),
        )));
    }

    // past combos, most recent first, excluding the one on display
    let dim = Style::default().add_modifier(Modifier::DIM);
    if snap.combo_history.len() > 1 {
        lines.push(Line::default());
        for past in &snap.combo_history[1..] {
            lines.push(Line::from(Span::styled(combo_phrase(past), dim)));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("(r)epeat combo  (e)nd early", dim)));

    render_centered(lines, area, buf);
}

fn render_footer(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        format!("tip: {}", snap.tip),
        Style::default()
            .add_modifier(Modifier::ITALIC)
            .add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(area, buf);
}

// Vertically centers a block of lines inside `area`.
fn render_centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let rect = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rect, buf);
}
