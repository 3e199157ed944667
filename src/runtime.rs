use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner. `Tick` carries the
/// session clock: one tick per second while a phase is counting down.
#[derive(Clone, Debug)]
pub enum SparEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait SparEventSource: Send + 'static {
    /// Blocks for up to `timeout` waiting for an event; Err(Timeout) means
    /// the interval elapsed quietly and the clock should advance.
    fn recv_timeout(&self, timeout: Duration) -> Result<SparEvent, RecvTimeoutError>;
}

/// Production event source backed by a crossterm reader thread.
pub struct CrosstermEventSource {
    rx: Receiver<SparEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SparEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SparEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SparEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SparEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source; lets tests step the clock deterministically
/// instead of waiting on wall-clock delays.
pub struct TestEventSource {
    rx: Receiver<SparEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SparEvent>) -> Self {
        Self { rx }
    }
}

impl SparEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SparEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time. Each tick
/// is yielded only after the previous step has been fully handled, so phase
/// ticks can never overlap or re-enter.
pub struct Runner<E: SparEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SparEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick
    /// when the interval expires.
    pub fn step(&self) -> SparEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => SparEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn quiet_interval_yields_a_tick() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        match runner.step() {
            SparEvent::Tick => {}
            other => panic!("expected Tick on timeout, got {other:?}"),
        }
    }

    #[test]
    fn queued_events_win_over_the_tick() {
        let (tx, rx) = mpsc::channel();
        tx.send(SparEvent::Resize).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        match runner.step() {
            SparEvent::Resize => {}
            other => panic!("expected the queued Resize, got {other:?}"),
        }
    }
}
