//! Scroll-spy navigation.
//!
//! [`ScrollSpy`] owns the active section. It is recomputed from the live layout
//! and scroll offset on every scroll event and never from history. Jumping to
//! a section only issues a smooth scroll; the highlight catches up through the
//! scroll events that animation produces.

use std::str::FromStr;

use thiserror::Error;

use crate::config::Config;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    About,
    Experience,
    Projects,
}

impl SectionId {
    /// Declaration order; earlier sections win when extents overlap.
    pub const ALL: [SectionId; 4] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Experience,
        SectionId::Projects,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Experience => "experience",
            SectionId::Projects => "projects",
        }
    }

    /// Label shown in the navigation bar.
    pub fn nav_label(&self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Experience => "Experience",
            SectionId::Projects => "Projects",
        }
    }
}

impl FromStr for SectionId {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.tag() == s)
            .ok_or_else(|| NavError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("no such section: {0}")]
    UnknownSection(String),
    #[error("section not mounted: {0}")]
    MissingTarget(SectionId),
}

/// Vertical extent of a mounted section, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub top: i32,
    pub height: i32,
}

impl Extent {
    pub fn new(top: i32, height: i32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Half-open `[top, top + height)`; an empty extent contains nothing.
    pub fn contains(&self, position: i32) -> bool {
        self.height > 0 && position >= self.top && position < self.bottom()
    }
}

/// Read access to the laid-out sections.
pub trait SectionLayout {
    /// `None` when the section isn't mounted (or hasn't been laid out yet).
    fn extent(&self, id: SectionId) -> Option<Extent>;
}

/// The scrollable viewport the page lives in.
pub trait Viewport {
    fn scroll_y(&self) -> i32;
    /// Start an animated scroll towards `top`. Completion is not reported.
    fn smooth_scroll_to(&mut self, top: i32);
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<SectionId>,
    active: SectionId,
    header_offset: i32,
    target_offset: i32,
}

impl ScrollSpy {
    pub fn new(
        sections: Vec<SectionId>,
        initial: SectionId,
        header_offset: i32,
        target_offset: i32,
    ) -> Self {
        Self {
            sections,
            active: initial,
            header_offset,
            target_offset,
        }
    }

    pub fn from_config(config: &Config, initial: SectionId) -> Self {
        Self::new(
            SectionId::ALL.to_vec(),
            initial,
            config.header_offset,
            config.target_offset,
        )
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// First section, in declaration order, whose extent holds `position`.
    pub fn section_at<L: SectionLayout + ?Sized>(&self, layout: &L, position: i32) -> Option<SectionId> {
        self.sections.iter().copied().find(|&id| {
            layout
                .extent(id)
                .is_some_and(|extent| extent.contains(position))
        })
    }

    /// Recompute the active section for the current scroll offset.
    ///
    /// When no section holds the offset the previous value stays. Returns
    /// whether the active section changed.
    pub fn on_scroll<L: SectionLayout + ?Sized>(&mut self, layout: &L, scroll_y: i32) -> bool {
        let position = scroll_y.saturating_add(self.header_offset);
        match self.section_at(layout, position) {
            Some(id) if id != self.active => {
                tracing::trace!(from = %self.active, to = %id, position, "active section");
                self.active = id;
                true
            }
            _ => false,
        }
    }

    /// Smooth-scroll so the section's top sits just under the header.
    ///
    /// Returns the requested offset. Unknown or unmounted sections leave both
    /// the viewport and the active section alone.
    pub fn scroll_to_section<L, V>(
        &self,
        id: SectionId,
        layout: &L,
        viewport: &mut V,
    ) -> Result<i32, NavError>
    where
        L: SectionLayout + ?Sized,
        V: Viewport + ?Sized,
    {
        if !self.sections.contains(&id) {
            return Err(NavError::UnknownSection(id.tag().to_string()));
        }
        let extent = layout.extent(id).ok_or(NavError::MissingTarget(id))?;
        let target = extent.top.saturating_sub(self.target_offset);
        viewport.smooth_scroll_to(target);
        Ok(target)
    }

    pub fn scroll_to_tag<L, V>(&self, tag: &str, layout: &L, viewport: &mut V) -> Result<i32, NavError>
    where
        L: SectionLayout + ?Sized,
        V: Viewport + ?Sized,
    {
        let id = tag.parse::<SectionId>()?;
        self.scroll_to_section(id, layout, viewport)
    }
}
