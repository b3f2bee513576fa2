//! Outer contours of a binary mask and their shape measures.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

/// Outermost borders only. Borders nested inside another blob's hole are
/// skipped along with the holes themselves. Order is raster discovery order.
pub fn external_contours(mask: &GrayImage) -> Vec<Vec<Point<i32>>> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|contour| {
            matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none()
        })
        .map(|contour| contour.points)
        .collect()
}

/// Polygon area enclosed by the contour (shoelace formula).
pub fn area(points: &[Point<i32>]) -> f64 {
    signed_double_area(points).abs() * 0.5
}

/// Length of the closed polyline through the contour points.
pub fn perimeter(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    edges(points)
        .map(|(a, b)| {
            let dx = (b.x - a.x) as f64;
            let dy = (b.y - a.y) as f64;
            dx.hypot(dy)
        })
        .sum()
}

/// `4π·area / perimeter²`: 1.0 for a circle, lower for elongated shapes.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
}

/// Spatial moments up to first order of the polygon interior, kept as the raw
/// Green's theorem sums (`2·m00`, `6·m10`, `6·m01`) with positive orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    sum00: f64,
    sum10: f64,
    sum01: f64,
}

impl Moments {
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }

        let mut sum00 = 0.0;
        let mut sum10 = 0.0;
        let mut sum01 = 0.0;
        for (prev, cur) in edges(points) {
            let (x0, y0) = (prev.x as f64, prev.y as f64);
            let (x1, y1) = (cur.x as f64, cur.y as f64);
            let cross = x0 * y1 - x1 * y0;
            sum00 += cross;
            sum10 += cross * (x0 + x1);
            sum01 += cross * (y0 + y1);
        }

        let sign = if sum00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            sum00: sign * sum00,
            sum10: sign * sum10,
            sum01: sign * sum01,
        }
    }

    pub fn m00(&self) -> f64 {
        self.sum00 / 2.0
    }

    pub fn m10(&self) -> f64 {
        self.sum10 / 6.0
    }

    pub fn m01(&self) -> f64 {
        self.sum01 / 6.0
    }

    /// `(m10 / m00, m01 / m00)`, or `None` when the zeroth moment vanishes.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.sum00 == 0.0 {
            return None;
        }
        // Single division of exact integer sums keeps whole-pixel centroids exact.
        let denominator = 3.0 * self.sum00;
        Some((self.sum10 / denominator, self.sum01 / denominator))
    }
}

fn signed_double_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    edges(points)
        .map(|(a, b)| a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64)
        .sum()
}

/// Consecutive point pairs, closing back to the first point.
fn edges(points: &[Point<i32>]) -> impl Iterator<Item = (Point<i32>, Point<i32>)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}
