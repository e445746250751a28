//! The portfolio page: content, scroll-spy, buttons and the project dialog,
//! wired to keyboard, mouse and tick events.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::{
    config::Config,
    content::{Portfolio, Project},
    document::{Document, ListenerGuard, StyleGuard},
    layout::{self, Action, BodyContext, BodyLayout, ButtonKind},
    links::LinkOpener,
    ripple::{self, BoundingBox, RippleButton},
    spy::{Extent, NavError, ScrollSpy, SectionId, SectionLayout, Viewport},
    typewriter::Typewriter,
};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The expanded view of one project.
#[derive(Debug, Clone, Default)]
pub struct Dialog {
    pub project: usize,
    pub scroll: u16,
    pub area: Option<BoundingBox>,
    pub buttons: Vec<(BoundingBox, Action)>,
}

fn logged(result: Result<i32, NavError>) -> Result<i32, NavError> {
    if let Err(err) = &result {
        tracing::debug!(%err, "navigation ignored");
    }
    result
}

fn scroll_to(spy: &ScrollSpy, document: &mut Document, id: SectionId) -> Result<i32, NavError> {
    let layout = document.sections().clone();
    logged(spy.scroll_to_section(id, &layout, document))
}

#[derive(Debug)]
pub struct Page {
    portfolio: Portfolio,
    config: Config,
    document: Document,
    spy: ScrollSpy,
    nav: Vec<RippleButton>,
    cta: RippleButton,
    typewriter: Typewriter,
    body: BodyLayout,
    body_area: Option<BoundingBox>,
    header_links: Vec<(BoundingBox, String)>,
    dialog: Option<Dialog>,
    focus: Option<usize>,
    year: i32,
    pending_jump: Option<SectionId>,
    _keyframes: StyleGuard,
    _scroll_listener: ListenerGuard,
}

impl Page {
    /// Build the page and make its document registrations, once.
    pub fn mount(portfolio: Portfolio, config: Config, initial: SectionId, year: i32) -> Self {
        let document = Document::new(config.smooth_scroll_duration());
        let scroll_listener = document.add_scroll_listener();
        let keyframes = document.inject_style(ripple::KEYFRAMES_NAME, ripple::KEYFRAMES);

        let nav = SectionId::ALL
            .iter()
            .map(|id| RippleButton::new(id.nav_label(), config.ripple_duration()))
            .collect();
        let typewriter = Typewriter::new(
            portfolio.roles.clone(),
            std::time::Duration::from_millis(config.typewriter_step_ms),
            std::time::Duration::from_millis(config.typewriter_pause_ms),
        );

        tracing::info!(%initial, "page mounted");
        Self {
            spy: ScrollSpy::from_config(&config, initial),
            cta: RippleButton::new("View My Work", config.ripple_duration()),
            nav,
            typewriter,
            body: BodyLayout::default(),
            body_area: None,
            header_links: Vec::new(),
            dialog: None,
            focus: None,
            year,
            pending_jump: (initial != SectionId::Home).then_some(initial),
            portfolio,
            config,
            document,
            _keyframes: keyframes,
            _scroll_listener: scroll_listener,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn active_section(&self) -> SectionId {
        self.spy.active()
    }

    pub fn nav_buttons(&self) -> &[RippleButton] {
        &self.nav
    }

    pub fn cta(&self) -> &RippleButton {
        &self.cta
    }

    pub fn body(&self) -> &BodyLayout {
        &self.body
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_project(&self) -> Option<&Project> {
        self.dialog
            .as_ref()
            .and_then(|d| self.portfolio.projects.get(d.project))
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// First body row currently at the top of the viewport.
    pub fn scroll_row(&self) -> usize {
        (self.document.scroll_y() / self.config.row_units()).max(0) as usize
    }

    /// Lay the body out for the given viewport and remeasure every section.
    pub fn relayout(&mut self, width: u16, viewport_rows: u16) {
        let ctx = BodyContext {
            typed: self.typewriter.text(),
            focused: self.focus,
            year: self.year,
        };
        self.body = layout::build(&self.portfolio, width, ctx);

        let ru = self.config.row_units();
        let units = |rows: usize| (rows as i32).saturating_mul(ru);
        for &id in &SectionId::ALL {
            match self.body.section_rows(id) {
                Some(rows) if !rows.is_empty() => {
                    self.document
                        .mount(id, Extent::new(units(rows.start), units(rows.len())));
                }
                _ => self.document.unmount(id),
            }
        }
        self.document
            .set_dimensions(units(self.body.rows()), units(viewport_rows as usize));

        if let Some(id) = self.pending_jump.take() {
            match self.document.extent(id) {
                Some(extent) => self
                    .document
                    .jump_to(extent.top.saturating_sub(self.config.target_offset)),
                None => tracing::debug!(%id, "initial section not mounted"),
            }
        }
        self.dispatch_scroll();
    }

    /// Deliver the pending scroll notification to the scroll-spy.
    pub fn dispatch_scroll(&mut self) -> bool {
        match self.document.take_scroll_event() {
            Some(y) => self.spy.on_scroll(self.document.sections(), y),
            None => false,
        }
    }

    pub fn navigate(&mut self, id: SectionId) -> Result<i32, NavError> {
        scroll_to(&self.spy, &mut self.document, id)
    }

    pub fn navigate_tag(&mut self, tag: &str) -> Result<i32, NavError> {
        let layout = self.document.sections().clone();
        logged(self.spy.scroll_to_tag(tag, &layout, &mut self.document))
    }

    pub fn scroll_rows(&mut self, rows: i32) {
        self.document
            .scroll_by(rows.saturating_mul(self.config.row_units()));
        self.dispatch_scroll();
    }

    fn page_rows(&self) -> i32 {
        (self.document.viewport_height() / self.config.row_units() - 2).max(1)
    }

    pub fn open_project(&mut self, idx: usize) {
        if idx < self.portfolio.projects.len() {
            self.focus = Some(idx);
            self.dialog = Some(Dialog {
                project: idx,
                ..Dialog::default()
            });
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn scroll_dialog(&mut self, delta: i32) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.scroll = (dialog.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        }
    }

    /// Clamp the dialog's scroll once the renderer knows how tall it is.
    pub fn clamp_dialog_scroll(&mut self, max: u16) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.scroll = dialog.scroll.min(max);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.portfolio.projects.len();
        if count == 0 {
            return;
        }
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focus = Some(next);
        if let Some(rows) = self.body.projects.get(next) {
            let top = (rows.start as i32)
                .saturating_mul(self.config.row_units())
                .saturating_sub(self.config.target_offset);
            self.document.smooth_scroll_to(top);
        }
    }

    pub fn perform(&mut self, action: Action, opener: &mut dyn LinkOpener) {
        match action {
            Action::Navigate(id) => {
                let _ = self.navigate(id);
            }
            Action::OpenProject(idx) => self.open_project(idx),
            Action::OpenUrl(url) => opener.open(&url),
            Action::OpenProjectLink => {
                if let Some(link) = self.dialog_project().and_then(|p| p.link.clone()) {
                    opener.open(&link);
                }
            }
            Action::CloseDialog => self.close_dialog(),
        }
    }

    fn open_profile(&mut self, label: &str, opener: &mut dyn LinkOpener) {
        match self.portfolio.link(label) {
            Some(link) => opener.open(&link.url),
            None => tracing::debug!(label, "no such profile link"),
        }
    }

    /// Ripple a nav button from the keyboard, centred on the button.
    fn press_nav(&mut self, idx: usize, now: Instant) {
        let Some(id) = SectionId::ALL.get(idx).copied() else {
            return;
        };
        let Page {
            nav, spy, document, ..
        } = self;
        let Some(button) = nav.get_mut(idx) else {
            return;
        };
        match button.bounds() {
            Some(b) => {
                let _ = button.click(b.left + b.width / 2, b.top + b.height / 2, b, now, || {
                    scroll_to(spy, document, id)
                });
            }
            None => {
                let _ = scroll_to(spy, document, id);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, opener: &mut dyn LinkOpener) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.dialog.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.close_dialog(),
                KeyCode::Enter | KeyCode::Char('o') => self.perform(Action::OpenProjectLink, opener),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_dialog(-1),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_dialog(1),
                _ => {}
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char(c @ '1'..='4') => {
                self.press_nav(c as usize - '1' as usize, now);
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_rows(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_rows(1),
            KeyCode::PageUp => self.scroll_rows(-self.page_rows()),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_rows(self.page_rows()),
            KeyCode::Home => self.document.smooth_scroll_to(0),
            KeyCode::End => {
                let max = self.document.max_scroll();
                self.document.smooth_scroll_to(max);
            }
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter => {
                if let Some(idx) = self.focus {
                    self.open_project(idx);
                }
            }
            KeyCode::Char('g') => self.open_profile("github", opener),
            KeyCode::Char('l') => self.open_profile("linkedin", opener),
            _ => {}
        }
        Flow::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant, opener: &mut dyn LinkOpener) {
        let (x, y) = (mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::ScrollDown if self.dialog.is_some() => self.scroll_dialog(WHEEL_ROWS),
            MouseEventKind::ScrollUp if self.dialog.is_some() => self.scroll_dialog(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => self.click(x, y, now, opener),
            _ => {}
        }
    }

    fn click(&mut self, x: i32, y: i32, now: Instant, opener: &mut dyn LinkOpener) {
        if let Some(dialog) = &self.dialog {
            let hit = dialog
                .buttons
                .iter()
                .find(|(b, _)| b.contains(x, y))
                .map(|(_, action)| action.clone());
            let outside = dialog.area.is_some_and(|a| !a.contains(x, y));
            match hit {
                Some(action) => self.perform(action, opener),
                None if outside => self.close_dialog(),
                None => {}
            }
            return;
        }

        if let Some(idx) = self.nav.iter().position(|b| b.hit(x, y)) {
            let id = SectionId::ALL[idx];
            let Page {
                nav, spy, document, ..
            } = self;
            let button = &mut nav[idx];
            if let Some(bounds) = button.bounds() {
                let _ = button.click(x, y, bounds, now, || scroll_to(spy, document, id));
            }
            return;
        }

        if let Some(url) = self
            .header_links
            .iter()
            .find(|(b, _)| b.contains(x, y))
            .map(|(_, url)| url.clone())
        {
            opener.open(&url);
            return;
        }

        let Some(area) = self.body_area.filter(|a| a.contains(x, y)) else {
            return;
        };
        let row = self.scroll_row() + (y - area.top) as usize;
        let col = (x - area.left) as u16;
        let Some(hotspot) = self.body.hotspot_at(row, col).cloned() else {
            return;
        };
        match (hotspot.kind, hotspot.action) {
            (ButtonKind::Cta, Action::Navigate(id)) => {
                let Some(bounds) = self.cta_bounds() else {
                    return;
                };
                let Page {
                    cta, spy, document, ..
                } = self;
                let _ = cta.click(x, y, bounds, now, || scroll_to(spy, document, id));
            }
            (_, action) => self.perform(action, opener),
        }
    }

    /// Screen bounds of the hero's call to action, while it is scrolled into view.
    pub fn cta_bounds(&self) -> Option<BoundingBox> {
        let area = self.body_area?;
        let cta = self.body.cta()?;
        let row = cta.row as i32 - self.scroll_row() as i32;
        (0..area.height).contains(&row).then(|| {
            BoundingBox::new(
                area.left + cta.cols.start as i32,
                area.top + row,
                cta.cols.len() as i32,
                1,
            )
        })
    }

    /// Advance timers and animations. Returns true when something needs redrawing.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;
        for button in self.nav.iter_mut().chain(std::iter::once(&mut self.cta)) {
            dirty |= button.is_active();
            button.poll(now);
        }
        let before = self.typewriter.text().len();
        let word = self.typewriter.word_index();
        self.typewriter.tick(now);
        dirty |= before != self.typewriter.text().len() || word != self.typewriter.word_index();

        dirty |= self.document.advance(now);
        dirty |= self.dispatch_scroll();
        dirty
    }

    /// Tear the page down, releasing everything it registered on the document.
    pub fn unmount(self) -> Document {
        let Page {
            document,
            _keyframes: keyframes,
            _scroll_listener: scroll_listener,
            ..
        } = self;
        drop(keyframes);
        drop(scroll_listener);
        tracing::info!("page unmounted");
        document
    }

    pub fn set_nav_bounds(&mut self, idx: usize, bounds: Option<BoundingBox>) {
        if let Some(button) = self.nav.get_mut(idx) {
            button.set_bounds(bounds);
        }
    }

    pub fn set_body_area(&mut self, area: Option<BoundingBox>) {
        self.body_area = area;
    }

    pub fn set_header_links(&mut self, links: Vec<(BoundingBox, String)>) {
        self.header_links = links;
    }

    pub fn set_dialog_layout(&mut self, area: BoundingBox, buttons: Vec<(BoundingBox, Action)>) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.area = Some(area);
            dialog.buttons = buttons;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::RecordingOpener;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn page() -> Page {
        let mut page = Page::mount(
            Portfolio::embedded().unwrap(),
            Config::default(),
            SectionId::Home,
            2026,
        );
        page.relayout(100, 30);
        page
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn finish_scroll(page: &mut Page, t0: Instant) {
        page.on_tick(t0);
        page.on_tick(t0 + ms(1000));
    }

    #[test]
    fn mount_registers_once() {
        let mut page = page();
        for _ in 0..5 {
            page.relayout(100, 30);
        }
        assert_eq!(page.document().scroll_listener_count(), 1);
        assert_eq!(page.document().style(ripple::KEYFRAMES_NAME), Some(ripple::KEYFRAMES));
    }

    #[test]
    fn sections_mounted_in_units() {
        let page = page();
        let ru = page.config().row_units();
        let about_rows = page.body().section_rows(SectionId::About).unwrap();
        assert_eq!(
            page.document().extent(SectionId::About),
            Some(Extent::new(about_rows.start as i32 * ru, about_rows.len() as i32 * ru))
        );
    }

    #[test]
    fn navigate_scrolls_and_spy_follows() {
        let t0 = Instant::now();
        let mut page = page();
        let target = page.navigate(SectionId::Experience).unwrap();
        let top = page.document().extent(SectionId::Experience).unwrap().top;
        assert_eq!(target, top - 80);
        // highlight lags until the animation produces scroll events
        assert_eq!(page.active_section(), SectionId::Home);

        finish_scroll(&mut page, t0);
        assert_eq!(page.document().scroll_y(), target.min(page.document().max_scroll()));
        assert_eq!(page.active_section(), SectionId::Experience);
    }

    #[test]
    fn unknown_tag_is_a_noop() {
        let mut page = page();
        page.scroll_rows(2);
        let y = page.document().scroll_y();
        assert!(page.navigate_tag("doesnotexist").is_err());
        assert!(!page.document().is_animating());
        assert_eq!(page.document().scroll_y(), y);
        assert_eq!(page.active_section(), SectionId::Home);
    }

    #[test]
    fn number_keys_navigate() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.handle_key(key(KeyCode::Char('2')), t0, &mut opener);
        finish_scroll(&mut page, t0);
        assert_eq!(page.active_section(), SectionId::About);
    }

    #[test]
    fn known_tag_navigates() {
        let t0 = Instant::now();
        let mut page = page();
        let top = page.document().extent(SectionId::About).unwrap().top;
        assert_eq!(page.navigate_tag("about"), Ok(top - 80));
        finish_scroll(&mut page, t0);
        assert_eq!(page.active_section(), SectionId::About);
    }

    #[test]
    fn highlight_passes_through_each_section_on_the_way_down() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.handle_key(key(KeyCode::Char('4')), t0, &mut opener);

        let mut seen = vec![page.active_section()];
        for i in 0..=80 {
            page.on_tick(t0 + ms(i * 5));
            if seen.last() != Some(&page.active_section()) {
                seen.push(page.active_section());
            }
        }
        assert!(!page.document().is_animating());
        assert_eq!(seen, SectionId::ALL.to_vec());
    }

    #[test]
    fn huge_row_height_does_not_overflow() {
        let t0 = Instant::now();
        let config = Config {
            row_height: i32::MAX,
            ..Config::default()
        };
        let mut page = Page::mount(
            Portfolio::embedded().unwrap(),
            config,
            SectionId::Projects,
            2026,
        );
        let mut opener = RecordingOpener::default();
        page.relayout(100, 30);
        page.scroll_rows(3);
        page.scroll_rows(-3);
        page.handle_key(key(KeyCode::Tab), t0, &mut opener);
        page.handle_key(key(KeyCode::End), t0, &mut opener);
        finish_scroll(&mut page, t0);
        assert!(page.document().scroll_y() >= 0);
        assert!(page.document().scroll_y() <= page.document().max_scroll());
    }

    #[test]
    fn nav_click_ripples_and_navigates() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.set_nav_bounds(3, Some(BoundingBox::new(40, 1, 12, 1)));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 43,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        page.handle_mouse(click, t0, &mut opener);
        assert_eq!(
            page.nav_buttons()[3].ripple(),
            ripple::RippleEvent { x: 3, y: 0, active: true }
        );
        assert!(page.document().is_animating());

        page.on_tick(t0 + ms(500));
        assert_eq!(page.nav_buttons()[3].ripple(), ripple::RippleEvent::NONE);
    }

    #[test]
    fn cta_click_ripples() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.set_body_area(Some(BoundingBox::new(0, 3, 100, 30)));
        let cta = page.body().cta().unwrap().clone();

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: cta.cols.start + 2,
            row: 3 + cta.row as u16,
            modifiers: KeyModifiers::NONE,
        };
        page.handle_mouse(click, t0, &mut opener);
        assert_eq!(page.cta().ripple(), ripple::RippleEvent { x: 2, y: 0, active: true });
        finish_scroll(&mut page, t0);
        assert_eq!(page.active_section(), SectionId::Projects);
    }

    #[test]
    fn tab_focus_and_dialog() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.handle_key(key(KeyCode::Tab), t0, &mut opener);
        page.handle_key(key(KeyCode::Tab), t0, &mut opener);
        assert_eq!(page.focus(), Some(1));
        page.handle_key(key(KeyCode::Enter), t0, &mut opener);
        assert_eq!(page.dialog_project().map(|p| p.title.as_str()), Some("Canvas Clone"));

        page.handle_key(key(KeyCode::Char('o')), t0, &mut opener);
        assert_eq!(opener.opened, vec!["https://github.com/lee-johnn/kambaz-react-web-app"]);

        // q closes the dialog rather than quitting
        assert_eq!(page.handle_key(key(KeyCode::Char('q')), t0, &mut opener), Flow::Continue);
        assert!(page.dialog().is_none());
        assert_eq!(page.handle_key(key(KeyCode::Char('q')), t0, &mut opener), Flow::Quit);
    }

    #[test]
    fn backtab_wraps_to_last_project() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.handle_key(key(KeyCode::BackTab), t0, &mut opener);
        assert_eq!(page.focus(), Some(3));
    }

    #[test]
    fn click_outside_dialog_closes_it() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.open_project(0);
        page.set_dialog_layout(
            BoundingBox::new(10, 5, 60, 20),
            vec![(BoundingBox::new(50, 22, 8, 1), Action::CloseDialog)],
        );
        let at = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        page.handle_mouse(at(20, 10), t0, &mut opener);
        assert!(page.dialog().is_some());
        page.handle_mouse(at(2, 2), t0, &mut opener);
        assert!(page.dialog().is_none());

        page.open_project(0);
        page.set_dialog_layout(
            BoundingBox::new(10, 5, 60, 20),
            vec![(BoundingBox::new(50, 22, 8, 1), Action::CloseDialog)],
        );
        page.handle_mouse(at(52, 22), t0, &mut opener);
        assert!(page.dialog().is_none());
    }

    #[test]
    fn profile_keys_open_links() {
        let t0 = Instant::now();
        let mut page = page();
        let mut opener = RecordingOpener::default();
        page.handle_key(key(KeyCode::Char('g')), t0, &mut opener);
        page.handle_key(key(KeyCode::Char('l')), t0, &mut opener);
        assert_eq!(
            opener.opened,
            vec!["https://github.com/lee-johnn", "https://www.linkedin.com/in/john-lee07/"]
        );
    }

    #[test]
    fn initial_section_jumps_on_first_layout() {
        let mut page = Page::mount(
            Portfolio::embedded().unwrap(),
            Config::default(),
            SectionId::Experience,
            2026,
        );
        page.relayout(100, 30);
        assert_eq!(page.active_section(), SectionId::Experience);
        assert!(page.document().scroll_y() > 0);
    }

    #[test]
    fn unmount_releases_registrations() {
        let document = page().unmount();
        assert_eq!(document.scroll_listener_count(), 0);
        assert_eq!(document.style(ripple::KEYFRAMES_NAME), None);
    }

    #[test]
    fn dropping_page_releases_listener() {
        let page = page();
        let watcher = page.document().add_scroll_listener();
        assert_eq!(watcher.listener_count(), 2);
        drop(page);
        assert_eq!(watcher.listener_count(), 1);
    }

    #[test]
    fn panicking_owner_still_releases_listener() {
        let page = page();
        let watcher = page.document().add_scroll_listener();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _page = page;
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert_eq!(watcher.listener_count(), 1);
    }
}
