//! Interactive constellation editing.
//!
//! [`EditorState`] owns the stars, the drawn links and the pending selection.
//! Pointer events are resolved geometrically:
//!
//! - **Hover**: a star within the hover radius wins over a link within the
//!   hover tolerance.
//! - **Click**: a click on a link removes it and does nothing else. Otherwise
//!   the nearest star is selected; two consecutive selections of different
//!   stars commit a link.

mod link;

#[cfg(test)]
mod tests;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArgResult, InvalidArgument};
use crate::geometry::{nearest, LineHitMode};
use crate::star::{Star, StarId, StarList};

pub use link::{Link, LinkId};

pub const DEFAULT_TITLE: &str = "Exoplanet Star Chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of drawn links. Passed through to rendering.
    pub line_width: f32,
    /// Size of star markers. Passed through to rendering.
    pub marker_size: f32,
    /// Pointer closer than this to a star hovers it.
    pub star_hover_radius: f32,
    /// Pointer closer than this to a link hovers it.
    pub link_hover_tolerance: f32,
    /// Click closer than this to a link removes it.
    pub link_removal_tolerance: f32,
    pub link_hit_mode: LineHitMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_width: 0.5,
            marker_size: 5.0,
            star_hover_radius: 5.0,
            link_hover_tolerance: 5.0,
            link_removal_tolerance: 2.5,
            link_hit_mode: LineHitMode::InfiniteLine,
        }
    }
}

impl EditorConfig {
    pub fn with_presentation(line_width: f32, marker_size: f32) -> Self {
        Self {
            line_width,
            marker_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ArgResult<()> {
        for (name, value) in [
            ("lineWidth", self.line_width),
            ("markerSize", self.marker_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidArgument::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("star_hover_radius", self.star_hover_radius),
            ("link_hover_tolerance", self.link_hover_tolerance),
            ("link_removal_tolerance", self.link_removal_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidArgument::Negative { name, value });
            }
        }
        Ok(())
    }
}

/// First endpoint of an in-progress link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PendingSelection {
    #[default]
    Empty,
    One(StarId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorIcon {
    Pointer,
    Hand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverTarget {
    #[default]
    None,
    Star(StarId),
    Link(LinkId),
}

impl HoverTarget {
    pub fn cursor(&self) -> CursorIcon {
        match self {
            HoverTarget::None => CursorIcon::Pointer,
            HoverTarget::Star(_) | HoverTarget::Link(_) => CursorIcon::Hand,
        }
    }
}

/// What a click did to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing to act on: no stars, or a non-finite position.
    Ignored,
    LinkRemoved(Link),
    /// First endpoint chosen; waiting for the second.
    StarSelected(StarId),
    LinkAdded(Link),
    /// The pending star was clicked again. Selection cleared, no link.
    SelectionCleared(StarId),
    /// The two stars are already linked. Selection cleared, no new link.
    AlreadyLinked(LinkId),
}

impl ClickOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}

/// Stars, links and the pending selection of one chart.
///
/// Single-writer: handlers take `&mut self` and run to completion.
#[derive(Debug, Clone)]
pub struct EditorState {
    stars: StarList,
    links: Vec<Link>,
    pending: PendingSelection,
    title: String,
    config: EditorConfig,
    next_link_id: u32,
    revision: u64,
}

impl EditorState {
    pub fn new(stars: StarList, config: EditorConfig) -> ArgResult<Self> {
        config.validate()?;

        Ok(Self {
            stars,
            links: Vec::new(),
            pending: PendingSelection::Empty,
            title: DEFAULT_TITLE.to_string(),
            config,
            next_link_id: 0,
            revision: 0,
        })
    }

    pub fn stars(&self) -> &StarList {
        &self.stars
    }

    /// Links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn pending(&self) -> PendingSelection {
        self.pending
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn line_width(&self) -> f32 {
        self.config.line_width
    }

    pub fn marker_size(&self) -> f32 {
        self.config.marker_size
    }

    /// Incremented on every change that needs a redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Hover affordance. Never mutates.
    pub fn on_pointer_move(&self, x: f32, y: f32) -> HoverTarget {
        let point = Vec2::new(x, y);
        if !point.is_finite() {
            return HoverTarget::None;
        }

        if let Some(star) = self
            .stars
            .iter()
            .find(|star| point.distance(star.pos()) < self.config.star_hover_radius)
        {
            return HoverTarget::Star(star.id);
        }

        self.links
            .iter()
            .find(|link| {
                link.hit(
                    self.config.link_hit_mode,
                    point,
                    self.config.link_hover_tolerance,
                )
            })
            .map_or(HoverTarget::None, |link| HoverTarget::Link(link.id))
    }

    pub fn on_click(&mut self, x: f32, y: f32) -> ClickOutcome {
        let point = Vec2::new(x, y);
        if !point.is_finite() {
            return ClickOutcome::Ignored;
        }

        if let Some(link) = self.remove_link_at(point) {
            debug!("Removed link {} ({} - {})", link.id, link.a, link.b);
            self.revision += 1;
            return ClickOutcome::LinkRemoved(link);
        }

        let Some(idx) = nearest(point, self.stars.iter().map(Star::pos)) else {
            return ClickOutcome::Ignored;
        };
        let selected = self.stars.stars()[idx].id;
        self.revision += 1;

        match self.pending {
            PendingSelection::Empty => {
                debug!("Selected star {}", selected);
                self.pending = PendingSelection::One(selected);
                ClickOutcome::StarSelected(selected)
            }
            PendingSelection::One(first) => {
                self.pending = PendingSelection::Empty;
                self.commit_link(first, selected)
            }
        }
    }

    pub fn rename_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
        self.revision += 1;
    }

    /// First link within removal tolerance, in creation order.
    fn remove_link_at(&mut self, point: Vec2) -> Option<Link> {
        let idx = self.links.iter().position(|link| {
            link.hit(
                self.config.link_hit_mode,
                point,
                self.config.link_removal_tolerance,
            )
        })?;
        Some(self.links.remove(idx))
    }

    fn commit_link(&mut self, a: StarId, b: StarId) -> ClickOutcome {
        if a == b {
            debug!("Star {} selected twice, selection cleared", a);
            return ClickOutcome::SelectionCleared(a);
        }
        if let Some(existing) = self.links.iter().find(|link| link.connects(a, b)) {
            debug!("Stars {} and {} already linked by {}", a, b, existing.id);
            return ClickOutcome::AlreadyLinked(existing.id);
        }

        let (Some(star_a), Some(star_b)) = (self.stars.by_id(a), self.stars.by_id(b)) else {
            return ClickOutcome::Ignored;
        };
        let link = Link {
            id: LinkId(self.next_link_id),
            a,
            b,
            start: star_a.pos(),
            end: star_b.pos(),
        };
        self.next_link_id += 1;
        self.links.push(link.clone());

        debug!("Linked stars {} and {} as {}", a, b, link.id);
        ClickOutcome::LinkAdded(link)
    }
}

/// Editor over `stars` with the given presentation parameters and default
/// hit-testing tolerances.
pub fn create_editor(stars: StarList, line_width: f32, marker_size: f32) -> ArgResult<EditorState> {
    EditorState::new(stars, EditorConfig::with_presentation(line_width, marker_size))
}
