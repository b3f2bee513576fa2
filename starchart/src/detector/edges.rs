//! Two-threshold (Canny) edge detection.
//!
//! 1. 3x3 Sobel gradients with replicated borders.
//! 2. L1 gradient magnitude `|dx| + |dy|`.
//! 3. Non-maximum suppression along the gradient direction quantized to
//!    horizontal, vertical and the two diagonals.
//! 4. Hysteresis: pixels above `high` seed edges, pixels above `low` join when
//!    8-connected to a seed.

use common::Buffer2;

/// tan(22.5°)
const TAN_22_5: f32 = 0.414_213_57;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    None,
    Weak,
    Strong,
}

/// Returns a binary map: 255 on edges, 0 elsewhere.
pub fn canny(src: &Buffer2<u8>, low: f32, high: f32) -> Buffer2<u8> {
    assert!(low <= high, "canny low threshold must not exceed high");

    let width = src.width();
    let height = src.height();
    let (dx, dy) = sobel(src);

    let magnitude = Buffer2::new(
        width,
        height,
        dx.pixels()
            .iter()
            .zip(dy.pixels())
            .map(|(gx, gy)| gx.abs() + gy.abs())
            .collect(),
    );
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            *magnitude.get(x as usize, y as usize)
        }
    };

    // Integer thresholds, as the magnitudes are integers.
    let low = low.floor() as i32;
    let high = high.floor() as i32;

    let mut states = Buffer2::new_filled(width, height, EdgeState::None);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let m = *magnitude.get(x, y);
            if m <= low {
                continue;
            }

            let gx = *dx.get(x, y);
            let gy = *dy.get(x, y);
            let (xi, yi) = (x as isize, y as isize);
            let xs = gx.abs() as f32;
            let ys = gy.abs() as f32;
            let tg22x = xs * TAN_22_5;

            let is_max = if ys < tg22x {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tg67x = tg22x + 2.0 * xs;
                if ys > tg67x {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s: isize = if (gx ^ gy) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };
            if !is_max {
                continue;
            }

            if m > high {
                *states.get_mut(x, y) = EdgeState::Strong;
                stack.push((x, y));
            } else {
                *states.get_mut(x, y) = EdgeState::Weak;
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let state = states.get_mut(nx, ny);
                if *state == EdgeState::Weak {
                    *state = EdgeState::Strong;
                    stack.push((nx, ny));
                }
            }
        }
    }

    states.map(|state| if *state == EdgeState::Strong { 255 } else { 0 })
}

/// 3x3 Sobel derivatives in x and y.
fn sobel(src: &Buffer2<u8>) -> (Buffer2<i32>, Buffer2<i32>) {
    let width = src.width();
    let height = src.height();
    let mut dx = Buffer2::new_filled(width, height, 0i32);
    let mut dy = Buffer2::new_filled(width, height, 0i32);

    for y in 0..height {
        for x in 0..width {
            let (xi, yi) = (x as isize, y as isize);
            let p = |ox: isize, oy: isize| *src.get_clamped(xi + ox, yi + oy) as i32;

            *dx.get_mut(x, y) = (p(1, -1) + 2 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2 * p(-1, 0) + p(-1, 1));
            *dy.get_mut(x, y) = (p(-1, 1) + 2 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2 * p(0, -1) + p(1, -1));
        }
    }

    (dx, dy)
}
