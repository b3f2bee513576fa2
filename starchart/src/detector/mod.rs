//! Star detection on raster images.
//!
//! # Pipeline
//!
//! 1. **Intensity**: convert to 8-bit single channel.
//! 2. **Smoothing**: Gaussian blur so the edge detector does not amplify
//!    pixel noise.
//! 3. **Edges**: two-threshold Canny edge map.
//! 4. **Dilation**: square structuring element closes gaps in star outlines.
//! 5. **Contours**: outer borders of the dilated blobs.
//! 6. **Filtering**: reject small (area), degenerate (perimeter) and
//!    non-round (circularity) contours.
//! 7. **Centroid**: first-order moments of the surviving contours, truncated
//!    to integer pixels, in contour discovery order.

mod blur;
mod contour;
mod edges;


use std::path::Path;

use common::Buffer2;
use image::{DynamicImage, GrayImage};
use imageproc::distance_transform::Norm;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ArgResult, DetectionError, DetectionResult, InvalidArgument};

pub use blur::{gaussian_blur, gaussian_kernel_1d};
pub use contour::Moments;
pub use edges::canny;

/// Detection parameters. Defaults suit bright stars on a dark sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Odd side of the Gaussian blur kernel.
    pub blur_kernel_size: u32,
    /// Gradient magnitude above which a pixel may extend an edge.
    pub canny_low: f32,
    /// Gradient magnitude above which a pixel starts an edge.
    pub canny_high: f32,
    /// Odd side of the square dilation element.
    pub dilation_kernel_size: u32,
    pub dilation_iterations: u32,
    /// Contours with area at or below this are noise.
    pub min_area: f32,
    /// Contours with circularity at or below this are not star-shaped.
    pub min_circularity: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 7,
            canny_low: 50.0,
            canny_high: 150.0,
            dilation_kernel_size: 5,
            dilation_iterations: 1,
            min_area: 50.0,
            min_circularity: 0.4,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> ArgResult<()> {
        for (name, value) in [
            ("blur_kernel_size", self.blur_kernel_size),
            ("dilation_kernel_size", self.dilation_kernel_size),
        ] {
            if value % 2 == 0 || value > 2 * u8::MAX as u32 + 1 {
                return Err(InvalidArgument::EvenKernel { name, value });
            }
        }
        for (name, value) in [
            ("canny_low", self.canny_low),
            ("canny_high", self.canny_high),
            ("min_area", self.min_area),
            ("min_circularity", self.min_circularity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidArgument::Negative { name, value });
            }
        }
        if self.canny_low > self.canny_high {
            return Err(InvalidArgument::ThresholdOrder {
                low: self.canny_low,
                high: self.canny_high,
            });
        }
        Ok(())
    }
}

/// Why a contour did not become a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Area,
    Perimeter,
    Circularity,
    ZeroMoment,
}

/// Measurements of one external contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub area: f64,
    pub perimeter: f64,
    pub circularity: f64,
    pub centroid: Option<(f64, f64)>,
    pub rejection: Option<Rejection>,
}

impl Candidate {
    pub fn is_star(&self) -> bool {
        self.rejection.is_none()
    }

    /// Integer pixel position, truncated toward zero.
    pub fn position(&self) -> Option<(i32, i32)> {
        match (self.rejection, self.centroid) {
            (None, Some((x, y))) => Some((x as i32, y as i32)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: DetectorConfig) -> ArgResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Reads and decodes an image file, then detects stars in it.
    pub fn detect_path(&self, path: impl AsRef<Path>) -> DetectionResult<Vec<(i32, i32)>> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DetectionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Detecting stars in {}", path.display());
        self.detect_bytes(&bytes)
    }

    /// Detects stars in an encoded image (PNG, JPEG, TIFF, BMP).
    pub fn detect_bytes(&self, bytes: &[u8]) -> DetectionResult<Vec<(i32, i32)>> {
        let image = image::load_from_memory(bytes)?;
        self.detect_image(&image)
    }

    pub fn detect_image(&self, image: &DynamicImage) -> DetectionResult<Vec<(i32, i32)>> {
        let candidates = self.candidates(image)?;
        let stars: Vec<(i32, i32)> = candidates.iter().filter_map(Candidate::position).collect();

        info!(
            "Detected {} stars from {} contours",
            stars.len(),
            candidates.len()
        );
        Ok(stars)
    }

    /// Every external contour with its measurements, in discovery order.
    pub fn candidates(&self, image: &DynamicImage) -> DetectionResult<Vec<Candidate>> {
        self.config.validate()?;

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyImage { width, height });
        }

        let intensity = to_intensity(image);
        let blurred = gaussian_blur(&intensity, self.config.blur_kernel_size as usize);
        let edges = canny(&blurred, self.config.canny_low, self.config.canny_high);
        let mask = self.dilate(to_gray_image(edges));

        let contours = contour::external_contours(&mask);
        debug!(
            "{}x{} image produced {} external contours",
            width,
            height,
            contours.len()
        );

        Ok(contours
            .iter()
            .map(|points| self.measure(points))
            .collect())
    }

    fn dilate(&self, mut mask: GrayImage) -> GrayImage {
        let radius = (self.config.dilation_kernel_size / 2) as u8;
        if radius == 0 {
            return mask;
        }
        for _ in 0..self.config.dilation_iterations {
            mask = imageproc::morphology::dilate(&mask, Norm::LInf, radius);
        }
        mask
    }

    fn measure(&self, points: &[imageproc::point::Point<i32>]) -> Candidate {
        let area = contour::area(points);
        let perimeter = contour::perimeter(points);
        let circularity = if perimeter > 0.0 {
            contour::circularity(area, perimeter)
        } else {
            0.0
        };
        let centroid = Moments::of_polygon(points).centroid();

        let rejection = if area <= self.config.min_area as f64 {
            Some(Rejection::Area)
        } else if perimeter <= 0.0 {
            Some(Rejection::Perimeter)
        } else if circularity <= self.config.min_circularity as f64 {
            Some(Rejection::Circularity)
        } else if centroid.is_none() {
            Some(Rejection::ZeroMoment)
        } else {
            None
        };

        Candidate {
            area,
            perimeter,
            circularity,
            centroid,
            rejection,
        }
    }
}

/// Detects stars in an image file with the default configuration.
pub fn detect(path: impl AsRef<Path>) -> DetectionResult<Vec<(i32, i32)>> {
    Detector::new().detect_path(path)
}

/// 8-bit intensity using `0.299 R + 0.587 G + 0.114 B`.
fn to_intensity(image: &DynamicImage) -> Buffer2<u8> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    if let DynamicImage::ImageLuma8(gray) = image {
        return Buffer2::new(width, height, gray.as_raw().clone());
    }

    let rgb = image.to_rgb8();
    let pixels = rgb
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
                .round()
                .clamp(0.0, 255.0) as u8
        })
        .collect();
    Buffer2::new(width, height, pixels)
}

fn to_gray_image(buffer: Buffer2<u8>) -> GrayImage {
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    GrayImage::from_raw(width, height, buffer.into_vec())
        .expect("buffer length always matches its dimensions")
}
