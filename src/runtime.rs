use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PageEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
    /// The event source has gone away; no further input will arrive.
    Closed,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait PageEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<PageEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                // key releases arrive on some platforms; only presses count
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => PageEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => PageEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => PageEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
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

impl PageEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError> {
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

/// Event source fed from a channel, for tests and scripted runs
pub struct TestEventSource {
    rx: Receiver<PageEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PageEvent>) -> Self {
        Self { rx }
    }
}

impl PageEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PageEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: PageEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: PageEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, Tick on timeout,
    /// or Closed once the source is disconnected
    pub fn step(&self) -> PageEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => PageEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => PageEvent::Closed,
        }
    }
}
