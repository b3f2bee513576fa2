//! Presentation snapshot of an editor, independent of any drawing backend.

use serde::{Deserialize, Serialize};

use crate::editor::{CursorIcon, EditorState, HoverTarget, LinkId};
use crate::star::StarId;

pub const TITLE_PROMPT: &str = "(insert name) constellation";
pub const X_LABEL: &str = "Right Ascension (degrees)";
pub const Y_LABEL: &str = "Declination (degrees)";

pub const FIGURE_COLOR: &str = "#3C3C3C";
pub const AXES_COLOR: &str = "#000000";
pub const STAR_COLOR: &str = "#FFFFFF";
pub const LINK_COLOR: &str = "#D3D3D3";
pub const TEXT_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub star: StarId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub link: LinkId,
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub width: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub revision: u64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub figure_color: String,
    pub axes_color: String,
    pub text_color: String,
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
    pub cursor: CursorIcon,
}

impl ChartScene {
    /// Everything a renderer needs to draw `editor` with `hover` under the pointer.
    pub fn from_editor(editor: &EditorState, hover: HoverTarget) -> Self {
        let markers = editor
            .stars()
            .iter()
            .map(|star| Marker {
                star: star.id,
                x: star.x,
                y: star.y,
                size: editor.marker_size(),
                color: STAR_COLOR.to_string(),
                label: star.annotation(),
            })
            .collect();

        let segments = editor
            .links()
            .iter()
            .map(|link| Segment {
                link: link.id,
                from: link.start.to_array(),
                to: link.end.to_array(),
                width: editor.line_width(),
                color: LINK_COLOR.to_string(),
            })
            .collect();

        Self {
            revision: editor.revision(),
            title: editor.title().to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            figure_color: FIGURE_COLOR.to_string(),
            axes_color: AXES_COLOR.to_string(),
            text_color: TEXT_COLOR.to_string(),
            markers,
            segments,
            cursor: hover.cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::create_editor;
    use crate::star::{build_stars, StarRecord};

    #[test]
    fn scene_reflects_editor_state() {
        let stars = build_stars(&[
            StarRecord::new("Mizar", 0.0, 0.0, 83.0),
            StarRecord::new("Alioth", 10.0, 4.0, 81.0),
        ])
        .unwrap();
        let mut editor = create_editor(stars, 1.5, 8.0).unwrap();
        editor.on_click(0.0, 0.0);
        editor.on_click(10.0, 4.0);
        editor.rename_title("Big Dipper constellation");

        let hover = editor.on_pointer_move(10.0, 4.0);
        let scene = ChartScene::from_editor(&editor, hover);

        assert_eq!(scene.title, "Big Dipper constellation");
        assert_eq!(scene.revision, editor.revision());
        assert_eq!(scene.cursor, CursorIcon::Hand);
        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.markers[1].label, "Alioth (z: 81 ly)");
        assert_eq!(scene.markers[1].size, 8.0);
        assert_eq!(scene.segments.len(), 1);
        assert_eq!(scene.segments[0].from, [0.0, 0.0]);
        assert_eq!(scene.segments[0].to, [10.0, 4.0]);
        assert_eq!(scene.segments[0].width, 1.5);
    }

    #[test]
    fn scene_serializes_for_renderers() -> anyhow::Result<()> {
        let stars = build_stars(&[StarRecord::new("Deneb", 3.0, 4.0, 2600.0)])?;
        let editor = create_editor(stars, 0.5, 5.0)?;

        let scene = ChartScene::from_editor(&editor, HoverTarget::Star(StarId(0)));
        let text = common::serde::serialize(&scene, common::FileFormat::Json)?;
        let json: serde_json::Value = serde_json::from_str(&text)?;

        assert_eq!(json["title"], "Exoplanet Star Chart");
        assert_eq!(json["cursor"], "Hand");
        assert_eq!(json["markers"][0]["label"], "Deneb (z: 2600 ly)");
        assert_eq!(json["markers"][0]["color"], STAR_COLOR);
        assert_eq!(json["segments"], serde_json::json!([]));
        Ok(())
    }

    #[test]
    fn idle_pointer_uses_default_cursor() {
        let stars = build_stars(&[StarRecord::new("Polaris", 5.0, 5.0, 433.0)]).unwrap();
        let editor = create_editor(stars, 0.5, 5.0).unwrap();

        let scene = ChartScene::from_editor(&editor, HoverTarget::None);

        assert_eq!(scene.cursor, CursorIcon::Pointer);
        assert!(scene.segments.is_empty());
        assert_eq!(scene.x_label, X_LABEL);
    }
}
