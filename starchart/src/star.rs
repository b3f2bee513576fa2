//! The star model shared by detection and the editor.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ArgResult, InvalidArgument};

/// Stable star identifier, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub u32);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Star {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Label drawn next to the marker.
    pub fn annotation(&self) -> String {
        format!("{} (z: {} ly)", self.name, self.depth)
    }
}

/// Externally supplied star: `(name, x, y, z)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl StarRecord {
    pub fn new(name: impl Into<String>, x: f32, y: f32, z: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
        }
    }

    fn validate(&self) -> ArgResult<()> {
        for (field, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !value.is_finite() {
                return Err(InvalidArgument::NonFiniteRecord {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Half-open integer range depths are drawn from for detected stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthRange {
    pub min: u32,
    pub max: u32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self { min: 100, max: 250 }
    }
}

impl DepthRange {
    pub fn validate(&self) -> ArgResult<()> {
        if self.min >= self.max {
            return Err(InvalidArgument::EmptyDepthRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..self.max) as f32
    }
}

/// Stars in input order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarList {
    stars: Vec<Star>,
}

impl StarList {
    /// Builds stars from manual records, ids `0..n` in input order.
    /// Coordinates are taken as-is.
    pub fn from_records(records: &[StarRecord]) -> ArgResult<Self> {
        let mut stars = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            record.validate()?;
            stars.push(Star {
                id: StarId(idx as u32),
                name: record.name.clone(),
                x: record.x,
                y: record.y,
                depth: record.z,
            });
        }
        Ok(Self { stars })
    }

    /// Builds stars from detected centroids, named `Star1`, `Star2`, ...
    /// with depth drawn from `depth`.
    pub fn from_detections<R: Rng + ?Sized>(
        centroids: &[(i32, i32)],
        depth: DepthRange,
        rng: &mut R,
    ) -> ArgResult<Self> {
        depth.validate()?;

        let stars = centroids
            .iter()
            .enumerate()
            .map(|(idx, &(x, y))| Star {
                id: StarId(idx as u32),
                name: format!("Star{}", idx + 1),
                x: x as f32,
                y: y as f32,
                depth: depth.sample(rng),
            })
            .collect();
        Ok(Self { stars })
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn by_id(&self, id: StarId) -> Option<&Star> {
        // ids are dense and match positions
        self.stars.get(id.0 as usize).filter(|star| star.id == id)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Star> {
        self.stars.iter()
    }

    pub fn to_records(&self) -> Vec<StarRecord> {
        self.stars
            .iter()
            .map(|star| StarRecord::new(star.name.clone(), star.x, star.y, star.depth))
            .collect()
    }

    /// Console listing: the star count, then one framed block per star.
    pub fn listing(&self) -> String {
        const RULE: &str = "*****************************";

        let mut out = format!("{}\n", self.stars.len());
        for star in &self.stars {
            out.push_str(RULE);
            out.push('\n');
            out.push_str(&format!("Star Name:     {}\n", star.name));
            out.push_str(&format!("Star X-Cords:  {}\n", star.x));
            out.push_str(&format!("Star Y-Cords:  {}\n", star.y));
            out.push_str(&format!("Star Z-Cords:  {}\n", star.depth));
            out.push_str(RULE);
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a StarList {
    type Item = &'a Star;
    type IntoIter = std::slice::Iter<'a, Star>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}

/// Manual-entry construction path.
pub fn build_stars(records: &[StarRecord]) -> ArgResult<StarList> {
    StarList::from_records(records)
}
