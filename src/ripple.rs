//! Transient click feedback.
//!
//! A [`RippleButton`] wraps a pressable control. Clicking it records where the
//! pointer landed (relative to the control), flags the ripple active and
//! schedules its own reset. The wrapped click handler always runs, right away,
//! and never waits on the effect.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::timer::DeferredTask;

/// Coordinate value meaning "no ripple".
pub const NO_COORD: i32 = -1;

/// Name the ripple keyframes are injected under.
pub const KEYFRAMES_NAME: &str = "ripple";

/// Glyphs from the freshest (densest) to the most faded stage of a ripple.
pub const KEYFRAMES: &[char] = &['●', '◉', '◎', '○', '·'];

/// Peak scale reached by the ripple ring, relative to its base radius.
pub const MAX_SCALE: f32 = 4.0;
/// Opacity at the moment of the click; fades to zero.
pub const START_OPACITY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleEvent {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

impl RippleEvent {
    pub const NONE: Self = Self {
        x: NO_COORD,
        y: NO_COORD,
        active: false,
    };
}

impl Default for RippleEvent {
    fn default() -> Self {
        Self::NONE
    }
}

/// Screen-space bounds of a control, in the same units as pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        Self::new(r.x as i32, r.y as i32, r.width as i32, r.height as i32)
    }
}

/// Visual state of an in-flight ripple at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleFrame {
    pub x: i32,
    pub y: i32,
    pub scale: f32,
    pub opacity: f32,
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone)]
pub struct RippleButton {
    pub label: String,
    ripple: RippleEvent,
    started_at: Option<Instant>,
    deactivate: DeferredTask,
    duration: Duration,
    bounds: Option<BoundingBox>,
}

impl RippleButton {
    pub fn new(label: impl Into<String>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            ripple: RippleEvent::NONE,
            started_at: None,
            deactivate: DeferredTask::new(),
            duration,
            bounds: None,
        }
    }

    pub fn ripple(&self) -> RippleEvent {
        self.ripple
    }

    pub fn is_active(&self) -> bool {
        self.ripple.active
    }

    /// Where the control was last drawn; used for hit testing.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Option<BoundingBox>) {
        self.bounds = bounds;
    }

    pub fn hit(&self, x: i32, y: i32) -> bool {
        self.bounds.is_some_and(|b| b.contains(x, y))
    }

    /// Start (or restart) the ripple at the pointer, then run the wrapped handler.
    ///
    /// A click while a ripple is already showing replaces it: new coordinates,
    /// the timer restarts from zero, and the earlier deadline is dropped.
    pub fn click<R>(
        &mut self,
        pointer_x: i32,
        pointer_y: i32,
        bbox: BoundingBox,
        now: Instant,
        on_click: impl FnOnce() -> R,
    ) -> R {
        self.activate(pointer_x, pointer_y, bbox, now);
        on_click()
    }

    pub fn activate(&mut self, pointer_x: i32, pointer_y: i32, bbox: BoundingBox, now: Instant) {
        self.ripple = RippleEvent {
            x: pointer_x - bbox.left,
            y: pointer_y - bbox.top,
            active: true,
        };
        self.started_at = Some(now);
        self.deactivate.schedule(now, self.duration);
        tracing::debug!(label = %self.label, x = self.ripple.x, y = self.ripple.y, "ripple");
    }

    /// Runs the pending reset if it is due. Returns true when the ripple was cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.deactivate.fire_if_due(now) {
            self.ripple = RippleEvent::NONE;
            self.started_at = None;
            true
        } else {
            false
        }
    }

    /// Fraction of the ripple's lifetime elapsed, while it is active.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        if !self.ripple.active {
            return None;
        }
        let started = self.started_at?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        Some((elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0))
    }

    pub fn frame(&self, now: Instant) -> Option<RippleFrame> {
        let t = ease_out(self.progress(now)?);
        Some(RippleFrame {
            x: self.ripple.x,
            y: self.ripple.y,
            scale: MAX_SCALE * t,
            opacity: START_OPACITY * (1.0 - t),
        })
    }
}

impl RippleFrame {
    /// Pick a glyph from `keyframes` according to how faded the ripple is.
    pub fn glyph(&self, keyframes: &[char]) -> Option<char> {
        if keyframes.is_empty() {
            return None;
        }
        let fade = 1.0 - (self.opacity / START_OPACITY).clamp(0.0, 1.0);
        let idx = ((fade * keyframes.len() as f32) as usize).min(keyframes.len() - 1);
        Some(keyframes[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn button() -> RippleButton {
        RippleButton::new("About", ms(500))
    }

    #[test]
    fn starts_with_sentinel() {
        assert_eq!(button().ripple(), RippleEvent::NONE);
        assert_eq!(RippleEvent::NONE, RippleEvent { x: -1, y: -1, active: false });
    }

    #[test]
    fn click_records_local_coordinates() {
        let t0 = Instant::now();
        let mut b = button();
        b.activate(130, 240, BoundingBox::new(100, 200, 80, 60), t0);
        assert_eq!(b.ripple(), RippleEvent { x: 30, y: 40, active: true });
    }

    #[test]
    fn resets_to_sentinel_after_duration() {
        let t0 = Instant::now();
        let mut b = button();
        b.activate(30, 40, BoundingBox::default(), t0);

        assert!(!b.poll(t0 + ms(499)));
        assert!(b.is_active());
        assert!(b.poll(t0 + ms(500)));
        assert_eq!(b.ripple(), RippleEvent { x: -1, y: -1, active: false });
    }

    #[test]
    fn second_click_supersedes_first() {
        let t0 = Instant::now();
        let mut b = button();
        b.activate(30, 40, BoundingBox::default(), t0);
        b.activate(10, 10, BoundingBox::default(), t0 + ms(100));
        assert_eq!(b.ripple(), RippleEvent { x: 10, y: 10, active: true });

        // the first click's deadline passes without clearing the second ripple
        assert!(!b.poll(t0 + ms(500)));
        assert_eq!(b.ripple(), RippleEvent { x: 10, y: 10, active: true });

        assert!(b.poll(t0 + ms(600)));
        assert_eq!(b.ripple(), RippleEvent::NONE);
    }

    #[test]
    fn wrapped_handler_runs_synchronously() {
        let t0 = Instant::now();
        let mut b = button();
        let mut clicked = 0;
        let out = b.click(5, 5, BoundingBox::default(), t0, || {
            clicked += 1;
            "done"
        });
        assert_eq!(out, "done");
        assert_eq!(clicked, 1);
        // the handler returned before the reset fired
        assert!(b.is_active());
    }

    #[test]
    fn frame_expands_and_fades() {
        let t0 = Instant::now();
        let mut b = button();
        b.activate(4, 2, BoundingBox::default(), t0);

        let start = b.frame(t0).unwrap();
        assert_eq!(start.scale, 0.0);
        assert!((start.opacity - START_OPACITY).abs() < f32::EPSILON);

        let mid = b.frame(t0 + ms(250)).unwrap();
        let end = b.frame(t0 + ms(500)).unwrap();
        assert!(mid.scale > start.scale && end.scale > mid.scale);
        assert!(mid.opacity < start.opacity && end.opacity < mid.opacity);
        assert!((end.scale - MAX_SCALE).abs() < 1e-4);

        b.poll(t0 + ms(500));
        assert!(b.frame(t0 + ms(500)).is_none());
    }

    #[test]
    fn glyph_walks_keyframes() {
        let fresh = RippleFrame { x: 0, y: 0, scale: 0.0, opacity: START_OPACITY };
        let faded = RippleFrame { x: 0, y: 0, scale: MAX_SCALE, opacity: 0.0 };
        assert_eq!(fresh.glyph(KEYFRAMES), Some('●'));
        assert_eq!(faded.glyph(KEYFRAMES), Some('·'));
        assert_eq!(fresh.glyph(&[]), None);
    }

    #[test]
    fn hit_testing_uses_last_bounds() {
        let mut b = button();
        assert!(!b.hit(0, 0));
        b.set_bounds(Some(BoundingBox::new(10, 0, 7, 1)));
        assert!(b.hit(10, 0));
        assert!(b.hit(16, 0));
        assert!(!b.hit(17, 0));
        assert!(!b.hit(12, 1));
    }
}
