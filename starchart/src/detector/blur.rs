//! Separable Gaussian smoothing of 8-bit intensity images.

use common::Buffer2;

/// Fixed binomial-like kernels used for small sizes when no sigma is given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Sigma implied by an odd kernel size.
pub fn sigma_for_kernel_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel of the given odd size.
pub fn gaussian_kernel_1d(size: usize) -> Vec<f32> {
    assert!(size % 2 == 1, "kernel size must be odd, got {}", size);

    if size <= 7 {
        return SMALL_KERNELS[size / 2].to_vec();
    }

    let sigma = sigma_for_kernel_size(size);
    let radius = (size / 2) as f32;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Blurs `src` with a `size`x`size` Gaussian. Borders are mirrored without
/// repeating the edge pixel.
pub fn gaussian_blur(src: &Buffer2<u8>, size: usize) -> Buffer2<u8> {
    let kernel = gaussian_kernel_1d(size);
    if kernel.len() == 1 {
        return src.clone();
    }

    let width = src.width();
    let height = src.height();
    let radius = (kernel.len() / 2) as isize;

    // Rows first, columns second, rounding once at the end.
    let mut rows = Buffer2::new_filled(width, height, 0.0f32);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - radius;
                acc += weight * *src.get_reflected(sx, y as isize) as f32;
            }
            *rows.get_mut(x, y) = acc;
        }
    }

    let mut output = Buffer2::new_filled(width, height, 0u8);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - radius;
                acc += weight * *rows.get_reflected(x as isize, sy);
            }
            *output.get_mut(x, y) = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}
