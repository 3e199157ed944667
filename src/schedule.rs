/// No combo is called once this few seconds remain in a round; narration
/// started inside the sprint window cannot finish before the bell.
pub const SPRINT_WINDOW_SECS: u32 = 3;

/// Remaining-second marks at which combo injections fire during a round.
///
/// The first combo of a round is called at round start, outside this
/// schedule. After that, marks walk down from `round_secs - cadence` in
/// `cadence` steps and stop before entering the sprint window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboSchedule {
    cadence_secs: u32,
    next_mark: Option<u32>,
}

impl ComboSchedule {
    /// A schedule with no marks; used outside active rounds.
    pub fn idle() -> Self {
        Self {
            cadence_secs: 0,
            next_mark: None,
        }
    }

    /// Seeds the schedule for a fresh round.
    pub fn for_round(round_secs: u32, cadence_secs: u32) -> Self {
        let mut schedule = Self {
            cadence_secs,
            next_mark: Some(round_secs),
        };
        schedule.advance();
        schedule
    }

    pub fn next_mark(&self) -> Option<u32> {
        self.next_mark
    }

    /// True when a combo injection is due at `remaining` seconds.
    pub fn fires_at(&self, remaining: u32) -> bool {
        self.next_mark == Some(remaining)
    }

    /// Recomputes the next mark after an injection fires. Marks that would
    /// land at or inside the sprint window are never scheduled.
    pub fn advance(&mut self) {
        self.next_mark = match self.next_mark {
            Some(mark) if mark > self.cadence_secs + SPRINT_WINDOW_SECS => {
                Some(mark - self.cadence_secs)
            }
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(round_secs: u32, cadence_secs: u32) -> Vec<u32> {
        let mut schedule = ComboSchedule::for_round(round_secs, cadence_secs);
        let mut out = Vec::new();
        while let Some(mark) = schedule.next_mark() {
            out.push(mark);
            schedule.advance();
        }
        out
    }

    #[test]
    fn marks_walk_down_by_cadence() {
        assert_eq!(marks(30, 10), vec![20, 10]);
        assert_eq!(marks(60, 15), vec![45, 30, 15]);
        assert_eq!(marks(30, 5), vec![25, 20, 15, 10, 5]);
    }

    #[test]
    fn no_mark_inside_sprint_window() {
        for (d, c) in [(30, 10), (60, 7), (90, 5), (120, 15)] {
            assert!(marks(d, c).iter().all(|&m| m > SPRINT_WINDOW_SECS));
        }
    }

    #[test]
    fn round_shorter_than_cadence_plus_sprint_has_no_marks() {
        // first mark would be d - c = 3, inside the sprint window
        assert_eq!(marks(10, 7), Vec::<u32>::new());
        assert_eq!(marks(8, 5), Vec::<u32>::new());
    }

    #[test]
    fn boundary_one_second_above_sprint_window_fires_once() {
        // d - c = 4 leaves the mark just outside the window
        assert_eq!(marks(14, 10), vec![4]);
        assert_eq!(marks(11, 7), vec![4]);
    }

    #[test]
    fn fires_only_at_the_scheduled_mark() {
        let schedule = ComboSchedule::for_round(30, 10);
        assert!(schedule.fires_at(20));
        assert!(!schedule.fires_at(21));
        assert!(!schedule.fires_at(10));
        assert!(!ComboSchedule::idle().fires_at(20));
    }

    #[test]
    fn mark_count_matches_cadence_formula() {
        // injections after the first: floor((d - c - 3) / c) + 1 when
        // d - c > 3, else 0; checked over the offered duration/tier grid
        for d in [30u32, 60, 90, 120] {
            for c in [15u32, 10, 7, 5] {
                let expected = if d - c > SPRINT_WINDOW_SECS {
                    (d - c - SPRINT_WINDOW_SECS) / c + 1
                } else {
                    0
                };
                assert_eq!(
                    marks(d, c).len() as u32,
                    expected,
                    "duration {d}s cadence {c}s"
                );
            }
        }
    }
}
