use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{link_distance, LineHitMode};
use crate::star::StarId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub u32);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A drawn segment between two stars.
///
/// Endpoint coordinates are captured when the link is committed and never
/// re-read from the star list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub a: StarId,
    pub b: StarId,
    pub start: Vec2,
    pub end: Vec2,
}

impl Link {
    /// True if the link joins `a` and `b`, in either order.
    pub fn connects(&self, a: StarId, b: StarId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    /// Pointer distance to the link, `None` for a zero-length link.
    pub fn distance(&self, mode: LineHitMode, point: Vec2) -> Option<f32> {
        link_distance(mode, point, self.start, self.end)
    }

    pub fn hit(&self, mode: LineHitMode, point: Vec2, tolerance: f32) -> bool {
        self.distance(mode, point)
            .is_some_and(|distance| distance < tolerance)
    }
}
