use std::path::PathBuf;

/// Rejected input at the core boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("{field} of star '{name}' must be finite, got {value}")]
    NonFiniteRecord {
        name: String,
        field: &'static str,
        value: f32,
    },
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be an odd size between 1 and 511, got {value}")]
    EvenKernel { name: &'static str, value: u32 },
    #[error("canny low threshold {low} must not exceed high threshold {high}")]
    ThresholdOrder { low: f32, high: f32 },
    #[error("depth range [{min}, {max}) is empty")]
    EmptyDepthRange { min: u32, max: u32 },
}

pub type ArgResult<T> = Result<T, InvalidArgument>;

/// Failure of a detection call. No partial results accompany it.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Failed to read image {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image")]
    Decode(#[from] image::ImageError),
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Invalid detector configuration")]
    InvalidConfig(#[from] InvalidArgument),
}

pub type DetectionResult<T> = Result<T, DetectionError>;

/// Failure while building a chart from an image or a star table.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
