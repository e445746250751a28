//! The scrollable document the page is laid out in.
//!
//! Holds what a browser page would: where each section was laid out, the
//! vertical scroll offset, an in-flight smooth scroll, and registrations made
//! against the document (scroll listeners, injected styles). Registrations are
//! handed out as guards and undone when the guard drops, so they are released
//! even when the owner unwinds.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::spy::{Extent, SectionId, SectionLayout, Viewport};

#[derive(Debug, Default)]
struct Registrations {
    scroll_listeners: usize,
    styles: BTreeMap<&'static str, &'static [char]>,
}

/// Keeps a scroll listener registered for as long as it lives.
#[derive(Debug)]
#[must_use = "dropping the guard unregisters the listener"]
pub struct ListenerGuard {
    registry: Rc<RefCell<Registrations>>,
}

impl ListenerGuard {
    /// Listeners registered on the document this guard belongs to.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().scroll_listeners
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut reg = self.registry.borrow_mut();
        reg.scroll_listeners = reg.scroll_listeners.saturating_sub(1);
    }
}

/// Keeps an injected style present for as long as it lives.
#[derive(Debug)]
#[must_use = "dropping the guard removes the style"]
pub struct StyleGuard {
    registry: Rc<RefCell<Registrations>>,
    name: &'static str,
}

impl Drop for StyleGuard {
    fn drop(&mut self) {
        self.registry.borrow_mut().styles.remove(self.name);
    }
}

/// Where each mounted section was laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    extents: HashMap<SectionId, Extent>,
}

impl SectionLayout for Sections {
    fn extent(&self, id: SectionId) -> Option<Extent> {
        self.extents.get(&id).copied()
    }
}

#[derive(Debug, Clone, Copy)]
struct SmoothScroll {
    from: i32,
    to: i32,
    started: Option<Instant>,
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug)]
pub struct Document {
    sections: Sections,
    scroll_y: i32,
    max_scroll: i32,
    viewport_height: i32,
    animation: Option<SmoothScroll>,
    smooth_duration: Duration,
    registry: Rc<RefCell<Registrations>>,
    scrolled: bool,
}

impl Document {
    pub fn new(smooth_duration: Duration) -> Self {
        Self {
            sections: Sections::default(),
            scroll_y: 0,
            max_scroll: 0,
            viewport_height: 0,
            animation: None,
            smooth_duration,
            registry: Rc::default(),
            scrolled: false,
        }
    }

    pub fn mount(&mut self, id: SectionId, extent: Extent) {
        self.sections.extents.insert(id, extent);
    }

    pub fn unmount(&mut self, id: SectionId) {
        self.sections.extents.remove(&id);
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn max_scroll(&self) -> i32 {
        self.max_scroll
    }

    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    /// Update the scrollable range after a layout pass.
    pub fn set_dimensions(&mut self, content_height: i32, viewport_height: i32) {
        self.viewport_height = viewport_height.max(0);
        self.max_scroll = content_height.saturating_sub(self.viewport_height).max(0);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0, self.max_scroll);
        }
        let clamped = self.scroll_y.clamp(0, self.max_scroll);
        self.set_scroll_y(clamped);
    }

    fn set_scroll_y(&mut self, y: i32) {
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scrolled = true;
        }
    }

    /// User-driven scroll. Takes over from any running animation.
    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        let y = self.scroll_y.saturating_add(delta).clamp(0, self.max_scroll);
        self.set_scroll_y(y);
    }

    pub fn jump_to(&mut self, y: i32) {
        self.animation = None;
        self.set_scroll_y(y.clamp(0, self.max_scroll));
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Step the smooth scroll. Returns true when the offset moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(mut anim) = self.animation else {
            return false;
        };
        let started = *anim.started.get_or_insert(now);
        let t = if self.smooth_duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started).as_secs_f64()
                / self.smooth_duration.as_secs_f64())
            .clamp(0.0, 1.0)
        };
        let span = f64::from(anim.to) - f64::from(anim.from);
        let y = (f64::from(anim.from) + span * ease_in_out(t)).round() as i32;
        self.animation = if t >= 1.0 { None } else { Some(anim) };

        let before = self.scroll_y;
        self.set_scroll_y(y.clamp(0, self.max_scroll));
        before != self.scroll_y
    }

    /// Takes the pending scroll notification, if any.
    ///
    /// Offset changes collapse into one notification per drain. With no
    /// listener registered the change is still applied but nobody hears of it.
    pub fn take_scroll_event(&mut self) -> Option<i32> {
        let scrolled = std::mem::take(&mut self.scrolled);
        (scrolled && self.scroll_listener_count() > 0).then_some(self.scroll_y)
    }

    pub fn add_scroll_listener(&self) -> ListenerGuard {
        self.registry.borrow_mut().scroll_listeners += 1;
        ListenerGuard {
            registry: Rc::clone(&self.registry),
        }
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.registry.borrow().scroll_listeners
    }

    pub fn inject_style(&self, name: &'static str, frames: &'static [char]) -> StyleGuard {
        self.registry.borrow_mut().styles.insert(name, frames);
        StyleGuard {
            registry: Rc::clone(&self.registry),
            name,
        }
    }

    pub fn style(&self, name: &str) -> Option<&'static [char]> {
        self.registry.borrow().styles.get(name).copied()
    }
}

impl SectionLayout for Document {
    fn extent(&self, id: SectionId) -> Option<Extent> {
        self.sections.extent(id)
    }
}

impl Viewport for Document {
    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn smooth_scroll_to(&mut self, top: i32) {
        self.animation = Some(SmoothScroll {
            from: self.scroll_y,
            to: top.clamp(0, self.max_scroll),
            started: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn doc() -> Document {
        let mut doc = Document::new(ms(300));
        doc.set_dimensions(3200, 600);
        doc
    }

    #[test]
    fn scroll_by_clamps_to_range() {
        let mut d = doc();
        d.scroll_by(-50);
        assert_eq!(d.scroll_y(), 0);
        d.scroll_by(10_000);
        assert_eq!(d.scroll_y(), 2600);
    }

    #[test]
    fn smooth_scroll_reaches_target_after_duration() {
        let t0 = Instant::now();
        let mut d = doc();
        d.smooth_scroll_to(1120);
        assert_eq!(d.scroll_y(), 0);

        d.advance(t0);
        d.advance(t0 + ms(150));
        let halfway = d.scroll_y();
        assert!(halfway > 0 && halfway < 1120);

        assert!(d.advance(t0 + ms(300)));
        assert_eq!(d.scroll_y(), 1120);
        assert!(!d.is_animating());
        assert!(!d.advance(t0 + ms(400)));
    }

    #[test]
    fn smooth_scroll_target_is_clamped() {
        let t0 = Instant::now();
        let mut d = doc();
        d.smooth_scroll_to(-80);
        d.advance(t0);
        d.advance(t0 + ms(300));
        assert_eq!(d.scroll_y(), 0);

        d.smooth_scroll_to(99_999);
        d.advance(t0 + ms(300));
        d.advance(t0 + ms(600));
        assert_eq!(d.scroll_y(), d.max_scroll());
    }

    #[test]
    fn new_smooth_scroll_supersedes_running_one() {
        let t0 = Instant::now();
        let mut d = doc();
        d.smooth_scroll_to(2000);
        d.advance(t0);
        d.advance(t0 + ms(100));
        d.smooth_scroll_to(400);
        d.advance(t0 + ms(100));
        d.advance(t0 + ms(400));
        assert_eq!(d.scroll_y(), 400);
    }

    #[test]
    fn user_scroll_interrupts_animation() {
        let t0 = Instant::now();
        let mut d = doc();
        d.smooth_scroll_to(2000);
        d.advance(t0);
        d.scroll_by(20);
        assert!(!d.is_animating());
        assert_eq!(d.scroll_y(), 20);
    }

    #[test]
    fn scroll_events_need_a_listener() {
        let mut d = doc();
        d.scroll_by(40);
        assert_eq!(d.take_scroll_event(), None);

        let _listener = d.add_scroll_listener();
        d.scroll_by(40);
        assert_eq!(d.take_scroll_event(), Some(80));
        assert_eq!(d.take_scroll_event(), None);

        // no movement, no event
        d.scroll_by(0);
        assert_eq!(d.take_scroll_event(), None);
    }

    #[test]
    fn listener_guard_releases_on_drop() {
        let d = doc();
        let first = d.add_scroll_listener();
        assert_eq!(d.scroll_listener_count(), 1);
        drop(first);
        assert_eq!(d.scroll_listener_count(), 0);
    }

    #[test]
    fn style_guard_releases_on_drop() {
        let d = doc();
        {
            let _style = d.inject_style("ripple", &['o', '.']);
            assert_eq!(d.style("ripple"), Some(&['o', '.'][..]));
        }
        assert_eq!(d.style("ripple"), None);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut d = doc();
        let _listener = d.add_scroll_listener();
        d.scroll_by(2600);
        d.take_scroll_event();
        d.set_dimensions(1000, 600);
        assert_eq!(d.scroll_y(), 400);
        assert_eq!(d.take_scroll_event(), Some(400));
    }

    #[test]
    fn mount_and_unmount_sections() {
        let mut d = doc();
        d.mount(SectionId::About, Extent::new(800, 800));
        assert_eq!(d.extent(SectionId::About), Some(Extent::new(800, 800)));
        d.unmount(SectionId::About);
        assert_eq!(d.extent(SectionId::About), None);
    }
}
