//! Draws the page: the header with its navigation, the scrolled body, ripples
//! and the project dialog.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    content::Project,
    layout::{image_ref, Action, ACCENT, MUTED},
    page::Page,
    ripple::{self, BoundingBox, RippleButton},
};

pub const HEADER_ROWS: u16 = 3;
const DIALOG_WIDTH: u16 = 72;

const HINT: &str = " 1-4 jump · ↑↓ scroll · Tab/Enter projects · g/l profiles · q quit";
const DIALOG_HINT: &str = " ↑↓ scroll · o open project · Esc close";

struct Screen {
    header: Rect,
    body: Rect,
    hint: Rect,
}

fn split(area: Rect) -> Screen {
    let [header, body, hint] = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    Screen { header, body, hint }
}

struct HeaderGeometry {
    row: u16,
    nav: Vec<Option<Rect>>,
    links: Vec<(Rect, String, String)>,
}

/// Place the header controls right to left. Whatever does not fit next to
/// the name is left out.
fn header_geometry(header: Rect, page: &Page) -> HeaderGeometry {
    let row = header.y + 1;
    let mut geometry = HeaderGeometry {
        row,
        nav: vec![None; page.nav_buttons().len()],
        links: Vec::new(),
    };
    if header.height < 2 {
        return geometry;
    }

    let floor = header.x + 2 + page.portfolio().name.width() as u16 + 2;
    let mut cursor = header.right().saturating_sub(1);
    let fits = |cursor: &mut u16, w: u16| {
        if *cursor < floor.saturating_add(w) {
            return None;
        }
        *cursor -= w;
        let rect = Rect::new(*cursor, row, w, 1);
        *cursor = cursor.saturating_sub(1);
        Some(rect)
    };

    for link in page.portfolio().links.iter().rev() {
        let Some(rect) = fits(&mut cursor, link.label.width() as u16 + 2) else {
            break;
        };
        geometry
            .links
            .push((rect, link.label.clone(), link.url.clone()));
    }
    geometry.links.reverse();
    cursor = cursor.saturating_sub(2);

    for (idx, button) in page.nav_buttons().iter().enumerate().rev() {
        match fits(&mut cursor, button.label.width() as u16 + 2) {
            Some(rect) => geometry.nav[idx] = Some(rect),
            None => break,
        }
    }
    geometry
}

struct DialogGeometry {
    rect: Rect,
    text: Rect,
    lines: Vec<Line<'static>>,
    max_scroll: u16,
    buttons: Vec<(Rect, &'static str, Action)>,
}

fn dialog_geometry(area: Rect, project: &Project) -> DialogGeometry {
    let muted = Style::default().fg(MUTED);
    let width = area.width.saturating_sub(4).min(DIALOG_WIDTH);
    let text_width = width.saturating_sub(4).max(1) as usize;

    let mut lines = vec![
        Line::styled(project.tech.clone(), muted),
        Line::styled(
            image_ref(project.image_or_placeholder()),
            muted.add_modifier(Modifier::ITALIC),
        ),
        Line::default(),
    ];
    for (idx, paragraph) in project.paragraphs().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.extend(
            textwrap::wrap(paragraph, text_width)
                .into_iter()
                .map(|l| Line::raw(l.into_owned())),
        );
    }

    // borders, a spacer and the button row
    let wanted = lines.len() as u16 + 4;
    let height = wanted.min(area.height.saturating_sub(2));
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let inner = Rect::new(
        rect.x + 2,
        rect.y + 1,
        rect.width.saturating_sub(4),
        rect.height.saturating_sub(2),
    );
    let text = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let button_row = inner.y + inner.height.saturating_sub(1);

    let mut labels = Vec::with_capacity(2);
    if project.link.is_some() {
        labels.push(("View Project ↗", Action::OpenProjectLink));
    }
    labels.push(("Close", Action::CloseDialog));

    let mut buttons = Vec::with_capacity(labels.len());
    let mut cursor = inner.right();
    for (label, action) in labels.into_iter().rev() {
        let w = label.width() as u16 + 2;
        if cursor < inner.x + w {
            break;
        }
        cursor -= w;
        buttons.push((Rect::new(cursor, button_row, w, 1), label, action));
        cursor = cursor.saturating_sub(2);
    }
    buttons.reverse();

    DialogGeometry {
        rect,
        text,
        max_scroll: (lines.len() as u16).saturating_sub(text.height),
        lines,
        buttons,
    }
}

/// Lay the page out for `area` and record where every control ended up.
pub fn prepare(page: &mut Page, area: Rect) {
    let screen = split(area);
    page.relayout(screen.body.width, screen.body.height);
    page.set_body_area((screen.body.area() > 0).then(|| screen.body.into()));

    let header = header_geometry(screen.header, page);
    for (idx, rect) in header.nav.iter().enumerate() {
        page.set_nav_bounds(idx, rect.map(BoundingBox::from));
    }
    page.set_header_links(
        header
            .links
            .into_iter()
            .map(|(rect, _, url)| (rect.into(), url))
            .collect(),
    );

    let dialog = page.dialog_project().map(|p| dialog_geometry(area, p));
    if let Some(geometry) = dialog {
        let buttons = geometry
            .buttons
            .into_iter()
            .map(|(rect, _, action)| (rect.into(), action))
            .collect();
        page.set_dialog_layout(geometry.rect.into(), buttons);
        page.clamp_dialog_scroll(geometry.max_scroll);
    }
}

pub fn draw(page: &mut Page, now: Instant, f: &mut Frame) {
    prepare(page, f.area());
    f.render_widget(PageView::new(page, now), f.area());
}

pub struct PageView<'a> {
    page: &'a Page,
    now: Instant,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a Page, now: Instant) -> Self {
        Self { page, now }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page = self.page;
        let screen = split(area);
        let keyframes = page.document().style(ripple::KEYFRAMES_NAME);

        let start = page.scroll_row().min(page.body().rows());
        let end = (start + screen.body.height as usize).min(page.body().rows());
        Paragraph::new(page.body().lines[start..end].to_vec()).render(screen.body, buf);
        if let Some(bounds) = page.cta_bounds() {
            render_ripple(page.cta(), to_rect(bounds), keyframes, self.now, buf);
        }

        render_header(page, screen.header, keyframes, self.now, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let hint = if page.dialog().is_some() {
            DIALOG_HINT
        } else {
            HINT
        };
        Paragraph::new(Span::styled(hint, dim)).render(screen.hint, buf);
        Paragraph::new(Span::styled(
            format!("{} ", page.active_section().nav_label()),
            Style::default().fg(ACCENT),
        ))
        .alignment(Alignment::Right)
        .render(screen.hint, buf);

        if let (Some(project), Some(dialog)) = (page.dialog_project(), page.dialog()) {
            buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
            render_dialog(project, dialog.scroll, area, buf);
        }
    }
}

fn to_rect(b: BoundingBox) -> Rect {
    Rect::new(
        b.left.max(0) as u16,
        b.top.max(0) as u16,
        b.width.max(0) as u16,
        b.height.max(0) as u16,
    )
}

fn render_header(
    page: &Page,
    area: Rect,
    keyframes: Option<&'static [char]>,
    now: Instant,
    buf: &mut Buffer,
) {
    Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Rgb(30, 58, 138)))
        .render(area, buf);
    if area.height < 2 {
        return;
    }
    let geometry = header_geometry(area, page);

    buf.set_stringn(
        area.x + 2,
        geometry.row,
        &page.portfolio().name,
        area.width.saturating_sub(2) as usize,
        Style::default()
            .fg(Color::Rgb(96, 165, 250))
            .add_modifier(Modifier::BOLD),
    );

    for ((button, rect), id) in page
        .nav_buttons()
        .iter()
        .zip(&geometry.nav)
        .zip(crate::spy::SectionId::ALL)
    {
        let Some(rect) = rect else {
            continue;
        };
        let style = if page.active_section() == id {
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(MUTED)
        };
        buf.set_stringn(
            rect.x,
            rect.y,
            format!(" {} ", button.label),
            rect.width as usize,
            style,
        );
        render_ripple(button, *rect, keyframes, now, buf);
    }

    for (rect, label, _) in &geometry.links {
        buf.set_stringn(
            rect.x,
            rect.y,
            format!(" {label} "),
            rect.width as usize,
            Style::default().add_modifier(Modifier::UNDERLINED),
        );
    }
}

/// Paint an expanding, fading ring over a button, clipped to its bounds.
fn render_ripple(
    button: &RippleButton,
    bounds: Rect,
    keyframes: Option<&'static [char]>,
    now: Instant,
    buf: &mut Buffer,
) {
    let Some(frame) = button.frame(now) else {
        return;
    };
    // keyframes are gone once the page unmounts
    let Some(glyph) = keyframes.and_then(|k| frame.glyph(k)) else {
        return;
    };
    let bg = if frame.opacity > 0.45 {
        Color::Rgb(147, 197, 253)
    } else if frame.opacity > 0.2 {
        Color::Rgb(191, 219, 254)
    } else {
        Color::Rgb(219, 234, 254)
    };

    let (ox, oy) = (bounds.x as i32 + frame.x, bounds.y as i32 + frame.y);
    let bounds = bounds.intersection(buf.area);
    for y in bounds.top()..bounds.bottom() {
        for x in bounds.left()..bounds.right() {
            // cells are roughly twice as tall as they are wide
            let dx = (x as i32 - ox) as f32;
            let dy = (y as i32 - oy) as f32 * 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > frame.scale + 0.5 {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(bg).set_fg(Color::Rgb(30, 64, 175));
                if cell.symbol() == " " && frame.scale - dist < 1.0 {
                    cell.set_char(glyph);
                }
            }
        }
    }
}

fn render_dialog(project: &Project, scroll: u16, area: Rect, buf: &mut Buffer) {
    let geometry = dialog_geometry(area, project);
    if geometry.rect.area() == 0 {
        return;
    }
    Clear.render(geometry.rect, buf);
    Block::bordered()
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} ", project.title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .render(geometry.rect, buf);

    let start = (scroll as usize).min(geometry.lines.len());
    Paragraph::new(geometry.lines[start..].to_vec()).render(geometry.text, buf);

    for (rect, label, action) in &geometry.buttons {
        let style = match action {
            Action::OpenProjectLink => Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED),
        };
        buf.set_stringn(rect.x, rect.y, format!(" {label} "), rect.width as usize, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, content::Portfolio, spy::SectionId};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn page() -> Page {
        Page::mount(
            Portfolio::embedded().unwrap(),
            Config::default(),
            SectionId::Home,
            2026,
        )
    }

    fn render(page: &mut Page, now: Instant, w: u16, h: u16) -> String {
        let backend = TestBackend::new(w, h);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(page, now, f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(w as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_header_and_hero() {
        let mut page = page();
        let screen = render(&mut page, Instant::now(), 100, 30);
        assert!(screen.contains("John Lee"));
        assert!(screen.contains("Hi, I'm John Lee"));
        assert!(screen.contains("▣ /circle.jpg"));
        for label in ["Home", "About", "Experience", "Projects", "GitHub", "LinkedIn"] {
            assert!(screen.contains(label), "missing {label}");
        }
        assert!(page.nav_buttons().iter().all(|b| b.bounds().is_some()));
    }

    #[test]
    fn narrow_header_drops_what_does_not_fit() {
        let mut page = page();
        render(&mut page, Instant::now(), 30, 20);
        assert!(page.nav_buttons().iter().any(|b| b.bounds().is_none()));
    }

    #[test]
    fn ripple_paints_keyframe_glyph() {
        let t0 = Instant::now();
        let mut page = page();
        render(&mut page, t0, 100, 30);
        let bounds = page.nav_buttons()[1].bounds().unwrap();
        assert_eq!(bounds.width, 7);
        let mut opener = crate::links::RecordingOpener::default();
        let click = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: bounds.left as u16 + 3,
            row: bounds.top as u16,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        page.handle_mouse(click, t0, &mut opener);

        let button_cells = |screen: &str| -> String {
            let row = screen.lines().nth(bounds.top as usize).unwrap();
            row.chars()
                .skip(bounds.left as usize)
                .take(bounds.width as usize)
                .collect()
        };
        // by 200ms the ring has reached the padding on both sides
        let during = render(&mut page, t0 + Duration::from_millis(200), 100, 30);
        assert!(button_cells(&during).chars().any(|c| ripple::KEYFRAMES.contains(&c)));

        page.on_tick(t0 + Duration::from_millis(500));
        let after = render(&mut page, t0 + Duration::from_millis(500), 100, 30);
        assert_eq!(button_cells(&after), " About ");
    }

    #[test]
    fn dialog_shows_paragraphs_and_buttons() {
        let mut page = page();
        page.open_project(0);
        let screen = render(&mut page, Instant::now(), 100, 40);
        assert!(screen.contains("SAVR"));
        assert!(screen.contains("View Project"));
        assert!(screen.contains("Close"));
        let dialog = page.dialog().unwrap();
        assert!(dialog.area.is_some());
        assert_eq!(dialog.buttons.len(), 2);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut page = page();
        page.open_project(1);
        render(&mut page, Instant::now(), 4, 3);
    }
}
