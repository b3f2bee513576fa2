//! Builds ready-to-edit charts from an image or from a manual star table.

use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::config::{ChartConfig, ManualChartRequest};
use crate::detector::Detector;
use crate::editor::{EditorConfig, EditorState};
use crate::error::ChartError;
use crate::star::StarList;

/// Detects stars in the image at `path`, names them `Star1..StarN` in
/// discovery order and draws their depths from `config.depth` using `rng`.
pub fn auto_chart<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    config: &ChartConfig,
    rng: &mut R,
) -> Result<EditorState, ChartError> {
    config.validate()?;

    let detector = Detector::from_config(config.detector.clone())?;
    let positions = detector.detect_path(path)?;
    let stars = StarList::from_detections(&positions, config.depth, rng)?;

    info!("Auto chart with {} stars", stars.len());
    editor_with_title(stars, config.editor.clone(), config)
}

/// Chart over the stars of a manual request. Its line width and star size
/// override the configured presentation.
pub fn manual_chart(
    request: &ManualChartRequest,
    config: &ChartConfig,
) -> Result<EditorState, ChartError> {
    config.validate()?;

    let stars = StarList::from_records(&request.records())?;

    info!("Manual chart with {} stars", stars.len());
    editor_with_title(stars, request.editor_config(&config.editor), config)
}

fn editor_with_title(
    stars: StarList,
    editor_config: EditorConfig,
    config: &ChartConfig,
) -> Result<EditorState, ChartError> {
    let mut editor = EditorState::new(stars, editor_config)?;
    if let Some(title) = &config.title {
        editor.rename_title(title.clone());
    }
    Ok(editor)
}
