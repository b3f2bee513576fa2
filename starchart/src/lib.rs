//! Starchart - star detection and interactive constellation drawing.
//!
//! Stars come either from an image (bright, round blobs found by the
//! detector) or from a manual table. The editor then links pairs of stars
//! with clicks and hit-tests the pointer against stars and links.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use starchart::{auto_chart, ChartConfig};
//!
//! let config = ChartConfig::default();
//! let mut editor = auto_chart("sky.png", &config, &mut config.rng())?;
//!
//! editor.on_click(120.0, 48.0);
//! let outcome = editor.on_click(310.0, 95.0);
//! println!("{:?}", outcome);
//! ```

pub mod chart;
pub mod config;
pub mod detector;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod star;

// ============================================================================
// Chart construction
// ============================================================================

pub use chart::{auto_chart, manual_chart};
pub use config::{ChartConfig, ManualChartRequest, ManualStar};

// ============================================================================
// Detection
// ============================================================================

pub use detector::{detect, Candidate, Detector, DetectorConfig, Rejection};

// ============================================================================
// Stars and editing
// ============================================================================

pub use editor::{
    create_editor, ClickOutcome, CursorIcon, EditorConfig, EditorState, HoverTarget, Link, LinkId,
    PendingSelection,
};
pub use geometry::LineHitMode;
pub use scene::ChartScene;
pub use star::{build_stars, DepthRange, Star, StarId, StarList, StarRecord};

// ============================================================================
// Errors
// ============================================================================

pub use error::{ChartError, DetectionError, InvalidArgument};
