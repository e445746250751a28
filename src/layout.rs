//! Lays the portfolio out as one tall column of terminal lines.
//!
//! The same pass that produces the lines also records where every section
//! starts and ends and where the clickable spots are, so measuring and
//! drawing can never disagree.

use std::ops::Range;

use itertools::Itertools;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::{content::Portfolio, spy::SectionId};

pub const MAX_CONTENT_WIDTH: u16 = 96;
/// Lines of project description shown on a card before it is cut off.
pub const DESCRIPTION_CLAMP: usize = 4;

pub const ACCENT: Color = Color::Rgb(37, 99, 235);
pub const MUTED: Color = Color::Gray;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(SectionId),
    OpenProject(usize),
    OpenUrl(String),
    OpenProjectLink,
    CloseDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Plain,
    /// The hero's call to action, which ripples when clicked.
    Cta,
}

/// A clickable span on one body row. Columns are relative to the body area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotspot {
    pub row: usize,
    pub cols: Range<u16>,
    pub action: Action,
    pub kind: ButtonKind,
}

impl Hotspot {
    pub fn contains(&self, row: usize, col: u16) -> bool {
        self.row == row && self.cols.contains(&col)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BodyContext<'a> {
    pub typed: &'a str,
    pub focused: Option<usize>,
    pub year: i32,
}

#[derive(Debug, Clone, Default)]
pub struct BodyLayout {
    pub width: u16,
    pub lines: Vec<Line<'static>>,
    pub sections: Vec<(SectionId, Range<usize>)>,
    pub projects: Vec<Range<usize>>,
    pub hotspots: Vec<Hotspot>,
}

impl BodyLayout {
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    pub fn section_rows(&self, id: SectionId) -> Option<Range<usize>> {
        self.sections
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, rows)| rows.clone())
    }

    pub fn hotspot_at(&self, row: usize, col: u16) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.contains(row, col))
    }

    pub fn cta(&self) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.kind == ButtonKind::Cta)
    }
}

struct Builder {
    width: u16,
    inner: u16,
    left: u16,
    lines: Vec<Line<'static>>,
    hotspots: Vec<Hotspot>,
}

impl Builder {
    fn new(width: u16) -> Self {
        let inner = width.saturating_sub(4).clamp(1, MAX_CONTENT_WIDTH);
        let left = width.saturating_sub(inner) / 2;
        Self {
            width,
            inner,
            left,
            lines: Vec::new(),
            hotspots: Vec::new(),
        }
    }

    fn row(&self) -> usize {
        self.lines.len()
    }

    fn push(&mut self, mut spans: Vec<Span<'static>>) {
        spans.insert(0, Span::raw(" ".repeat(self.left as usize)));
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn blanks(&mut self, n: usize) {
        for _ in 0..n {
            self.blank();
        }
    }

    fn text(&mut self, text: impl Into<String>, style: Style) {
        self.push(vec![Span::styled(text.into(), style)]);
    }

    fn wrap(text: &str, width: usize) -> Vec<String> {
        textwrap::wrap(text, width.max(1))
            .into_iter()
            .map(|l| l.into_owned())
            .collect()
    }

    fn wrapped(&mut self, text: &str, style: Style) {
        for line in Self::wrap(text, self.inner as usize) {
            self.text(line, style);
        }
    }

    fn centered(&mut self, text: &str, style: Style) {
        let pad = (self.inner as usize).saturating_sub(text.width()) / 2;
        self.push(vec![Span::raw(" ".repeat(pad)), Span::styled(text.to_string(), style)]);
    }

    fn heading(&mut self, title: &str) {
        self.centered(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
        self.centered("━━━━━━━━", Style::default().fg(ACCENT));
        self.blank();
    }

    /// A row of buttons, left-aligned with `indent` columns before the first.
    fn buttons(&mut self, indent: u16, buttons: Vec<(String, Action, ButtonKind, Style)>) {
        let row = self.row();
        let mut col = self.left + indent;
        let mut spans = vec![Span::raw(" ".repeat(indent as usize))];
        for (i, (label, action, kind, style)) in buttons.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
                col += 2;
            }
            let label = format!(" {label} ");
            let w = label.width() as u16;
            self.hotspots.push(Hotspot {
                row,
                cols: col..col + w,
                action,
                kind,
            });
            spans.push(Span::styled(label, style));
            col += w;
        }
        self.push(spans);
    }

    fn card_edge(&mut self, top: bool, border: Style) {
        let (l, r) = if top { ('╭', '╮') } else { ('╰', '╯') };
        let fill = "─".repeat((self.inner as usize).saturating_sub(2));
        self.text(format!("{l}{fill}{r}"), border);
    }

    fn card_inner_width(&self) -> usize {
        (self.inner as usize).saturating_sub(4).max(1)
    }

    fn card_line(&mut self, spans: Vec<Span<'static>>, border: Style) {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let fill = self.card_inner_width().saturating_sub(used);
        let mut all = vec![Span::styled("│ ", border)];
        all.extend(spans);
        all.push(Span::raw(" ".repeat(fill)));
        all.push(Span::styled(" │", border));
        self.push(all);
    }

    fn card_text(&mut self, text: &str, style: Style, border: Style) {
        for line in Self::wrap(text, self.card_inner_width()) {
            self.card_line(vec![Span::styled(line, style)], border);
        }
    }

    /// A right-aligned button on its own card row.
    fn card_button(&mut self, label: &str, action: Action, style: Style, border: Style) {
        let label = format!(" {label} ");
        let w = label.width();
        let pad = self.card_inner_width().saturating_sub(w);
        let col = self.left + 2 + pad as u16;
        self.hotspots.push(Hotspot {
            row: self.row(),
            cols: col..col + w as u16,
            action,
            kind: ButtonKind::Plain,
        });
        self.card_line(
            vec![Span::raw(" ".repeat(pad)), Span::styled(label, style)],
            border,
        );
    }
}

fn clamp_lines(mut lines: Vec<String>, max: usize) -> Vec<String> {
    if lines.len() > max {
        lines.truncate(max);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

/// Pictures can't be drawn, so they show as a marked reference.
pub fn image_ref(src: &str) -> String {
    format!("▣ {src}")
}

/// Lay out the whole page body at `width` columns.
pub fn build(portfolio: &Portfolio, width: u16, ctx: BodyContext<'_>) -> BodyLayout {
    let mut b = Builder::new(width);
    let mut sections = Vec::with_capacity(SectionId::ALL.len());
    let mut projects = Vec::with_capacity(portfolio.projects.len());

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(MUTED);
    let accent = Style::default().fg(ACCENT);
    let accent_bold = accent.add_modifier(Modifier::BOLD);
    let picture = muted.add_modifier(Modifier::ITALIC);
    let border = Style::default().fg(Color::Rgb(191, 219, 254));

    // home
    let start = b.row();
    b.blanks(2);
    if let Some(portrait) = &portfolio.portrait {
        b.text(image_ref(portrait), picture);
        b.blank();
    }
    b.text(portfolio.greeting.clone(), bold.fg(Color::White));
    b.text(format!("{}▏", ctx.typed), accent_bold);
    b.blank();
    b.wrapped(&portfolio.tagline, muted);
    b.blank();
    b.buttons(
        0,
        vec![
            (
                "View My Work".to_string(),
                Action::Navigate(SectionId::Projects),
                ButtonKind::Cta,
                Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            (
                "About Me".to_string(),
                Action::Navigate(SectionId::About),
                ButtonKind::Plain,
                accent.add_modifier(Modifier::REVERSED),
            ),
        ],
    );
    b.blanks(2);
    let chevron_indent = b.inner.saturating_sub(3) / 2;
    b.buttons(
        chevron_indent,
        vec![(
            "⌄".to_string(),
            Action::Navigate(SectionId::About),
            ButtonKind::Plain,
            accent_bold,
        )],
    );
    b.blanks(2);
    sections.push((SectionId::Home, start..b.row()));

    // about
    let start = b.row();
    b.blank();
    b.heading("About Me");
    b.text("Who I Am", bold);
    b.blank();
    for paragraph in Itertools::intersperse(portfolio.about.iter().map(Some), None) {
        match paragraph {
            Some(text) => b.wrapped(text, muted),
            None => b.blank(),
        }
    }
    b.blank();
    b.text("Education", bold);
    for edu in &portfolio.education {
        b.card_edge(true, border);
        b.card_line(vec![Span::styled(edu.school.clone(), accent_bold)], border);
        b.card_text(&edu.degree, Style::default(), border);
        b.card_line(vec![Span::styled(edu.years.clone(), muted)], border);
        b.card_line(vec![Span::styled("▔".repeat(b.card_inner_width()), accent)], border);
        b.card_edge(false, border);
    }
    b.blank();
    sections.push((SectionId::About, start..b.row()));

    // experience
    let start = b.row();
    b.blank();
    b.heading("Work Experience");
    for job in &portfolio.experience {
        b.card_edge(true, border);
        b.card_line(vec![Span::styled(job.role.clone(), accent_bold)], border);
        b.card_text(&job.organization, bold, border);
        if let Some(logo) = job.logo.as_deref().filter(|l| !l.is_empty()) {
            b.card_text(&image_ref(logo), picture, border);
        }
        b.card_line(vec![], border);
        let opts_width = b.card_inner_width();
        for highlight in &job.highlights {
            let opts = textwrap::Options::new(opts_width)
                .initial_indent("• ")
                .subsequent_indent("  ");
            for line in textwrap::wrap(highlight, opts) {
                b.card_line(vec![Span::styled(line.into_owned(), muted)], border);
            }
        }
        b.card_edge(false, border);
        b.blank();
    }
    b.blank();
    sections.push((SectionId::Experience, start..b.row()));

    // projects
    let start = b.row();
    b.blank();
    b.heading("Projects");
    for (idx, project) in portfolio.projects.iter().enumerate() {
        let card_start = b.row();
        let card_border = if ctx.focused == Some(idx) {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            border
        };
        b.card_edge(true, card_border);
        let badge = " Project ";
        let title_room = b.card_inner_width().saturating_sub(badge.width() + 1);
        let title = Builder::wrap(&project.title, title_room)
            .into_iter()
            .next()
            .unwrap_or_default();
        let gap = b
            .card_inner_width()
            .saturating_sub(title.width() + badge.width());
        b.card_line(
            vec![
                Span::styled(title, accent_bold),
                Span::raw(" ".repeat(gap)),
                Span::styled(
                    badge,
                    Style::default().fg(Color::Rgb(30, 64, 175)).bg(Color::Rgb(219, 234, 254)),
                ),
            ],
            card_border,
        );
        b.card_text(&image_ref(project.image_or_placeholder()), picture, card_border);
        b.card_line(vec![Span::styled(project.tech.clone(), muted)], card_border);
        b.card_line(vec![], card_border);
        let description = clamp_lines(
            Builder::wrap(&project.description, b.card_inner_width()),
            DESCRIPTION_CLAMP,
        );
        for line in description {
            b.card_line(vec![Span::raw(line)], card_border);
        }
        b.card_button("Read More ↗", Action::OpenProject(idx), accent_bold, card_border);
        b.card_edge(false, card_border);
        projects.push(card_start..b.row());
        b.blank();
    }
    b.blank();
    sections.push((SectionId::Projects, start..b.row()));

    // footer
    b.text("─".repeat(b.inner as usize), Style::default().fg(Color::Rgb(30, 58, 138)));
    b.blank();
    b.text(
        portfolio.name.clone(),
        Style::default().fg(Color::Rgb(96, 165, 250)).add_modifier(Modifier::BOLD),
    );
    b.buttons(
        0,
        portfolio
            .links
            .iter()
            .map(|l| {
                (
                    l.label.clone(),
                    Action::OpenUrl(l.url.clone()),
                    ButtonKind::Plain,
                    Style::default().add_modifier(Modifier::UNDERLINED),
                )
            })
            .collect(),
    );
    b.blank();
    b.centered(
        &format!("© {} {}. All rights reserved.", ctx.year, portfolio.name),
        muted,
    );
    b.blank();

    BodyLayout {
        width: b.width,
        lines: b.lines,
        sections,
        projects,
        hotspots: b.hotspots,
    }
}
