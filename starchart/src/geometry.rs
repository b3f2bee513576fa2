use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a pointer is measured against a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineHitMode {
    /// Perpendicular distance to the infinite line through both endpoints.
    /// A point far past an endpoint but collinear with the link still hits.
    #[default]
    InfiniteLine,
    /// Distance to the closest point of the finite segment.
    Segment,
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// Returns `None` for a zero-length line.
pub fn line_distance(point: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    let d = b - a;
    let denominator = d.length();
    if denominator == 0.0 {
        return None;
    }

    let numerator = d.y * point.x - d.x * point.y + b.x * a.y - b.y * a.x;
    Some(numerator.abs() / denominator)
}

/// Distance from `point` to the segment `a..b`.
///
/// Returns `None` for a zero-length segment.
pub fn segment_distance(point: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return None;
    }

    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    Some(point.distance(a + ab * t))
}

pub fn link_distance(mode: LineHitMode, point: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    match mode {
        LineHitMode::InfiniteLine => line_distance(point, a, b),
        LineHitMode::Segment => segment_distance(point, a, b),
    }
}

/// Index of the position closest to `point`. Ties resolve to the lowest index.
pub fn nearest(point: Vec2, positions: impl IntoIterator<Item = Vec2>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, pos) in positions.into_iter().enumerate() {
        let dist = point.distance(pos);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_distance_is_perpendicular() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        let d = line_distance(Vec2::new(5.0, 3.0), a, b).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn line_distance_ignores_segment_extent() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        let d = line_distance(Vec2::new(100.0, 0.5), a, b).unwrap();
        assert!((d - 0.5).abs() < 1e-5);

        let clamped = segment_distance(Vec2::new(100.0, 0.5), a, b).unwrap();
        assert!(clamped > 89.0);
    }

    #[test]
    fn degenerate_lines_have_no_distance() {
        let p = Vec2::new(1.0, 1.0);
        assert!(line_distance(p, Vec2::ONE, Vec2::ONE).is_none());
        assert!(segment_distance(p, Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn diagonal_line_distance() {
        let d = line_distance(
            Vec2::new(0.0, 2.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 4.0),
        )
        .unwrap();
        assert!((d - 2.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn nearest_breaks_ties_by_lowest_index() {
        let positions = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(nearest(Vec2::ZERO, positions), Some(0));
        assert_eq!(nearest(Vec2::new(0.9, 0.0), positions), Some(1));
        assert_eq!(nearest(Vec2::ZERO, std::iter::empty()), None);
    }
}
