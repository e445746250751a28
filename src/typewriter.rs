use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Pausing,
    Deleting,
}

/// Cycles through a list of words, typing each out, holding it, then erasing
/// it. Loops forever. Driven by ticks; it catches up on however much time has
/// passed since the previous tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<String>,
    word: usize,
    visible: usize,
    phase: Phase,
    step: Duration,
    pause: Duration,
    last: Option<Instant>,
    carry: Duration,
}

impl Typewriter {
    pub fn new(words: Vec<String>, step: Duration, pause: Duration) -> Self {
        let min = Duration::from_millis(1);
        Self {
            words,
            word: 0,
            visible: 0,
            phase: Phase::Typing,
            step: step.max(min),
            pause: pause.max(min),
            last: None,
            carry: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn word_index(&self) -> usize {
        self.word
    }

    /// The currently visible prefix of the current word.
    pub fn text(&self) -> &str {
        let Some(word) = self.words.get(self.word) else {
            return "";
        };
        match word.char_indices().nth(self.visible) {
            Some((idx, _)) => &word[..idx],
            None => word,
        }
    }

    fn word_len(&self) -> usize {
        self.words.get(self.word).map_or(0, |w| w.chars().count())
    }

    fn cost(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.step,
            Phase::Pausing => self.pause,
            // erasing runs at double speed
            Phase::Deleting => (self.step / 2).max(Duration::from_millis(1)),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.words.is_empty() {
            return;
        }
        let last = *self.last.get_or_insert(now);
        self.carry += now.saturating_duration_since(last);
        self.last = Some(now);

        while self.carry >= self.cost() {
            self.carry -= self.cost();
            self.advance();
        }
    }

    fn advance(&mut self) {
        match self.phase {
            Phase::Typing => {
                if self.visible < self.word_len() {
                    self.visible += 1;
                }
                if self.visible >= self.word_len() {
                    self.phase = Phase::Pausing;
                }
            }
            Phase::Pausing => self.phase = Phase::Deleting,
            Phase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.word = (self.word + 1) % self.words.len();
                    self.phase = Phase::Typing;
                }
            }
        }
    }
}
