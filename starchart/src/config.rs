//! File-backed configuration and the manual-entry request format.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::detector::DetectorConfig;
use crate::editor::EditorConfig;
use crate::error::ArgResult;
use crate::star::{DepthRange, StarRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Replaces the default chart title when set.
    pub title: Option<String>,
    pub detector: DetectorConfig,
    pub editor: EditorConfig,
    pub depth: DepthRange,
    /// Seed for depths of detected stars. Random when unset.
    pub seed: Option<u64>,
}

impl ChartConfig {
    /// Loads a `.yaml`, `.yml` or `.json` file and validates it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: Self = common::serde::load_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ArgResult<()> {
        self.detector.validate()?;
        self.editor.validate()?;
        self.depth.validate()
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// A star as entered in the manual form: right ascension, declination and
/// distance, taken as plain chart coordinates.
///
/// Form fields arrive as text, so numbers may also be given as strings.
/// `x`, `y` and `z` are accepted in place of `ra`, `dec` and `dist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualStar {
    pub name: String,
    #[serde(alias = "x", deserialize_with = "number_or_text")]
    pub ra: f32,
    #[serde(alias = "y", deserialize_with = "number_or_text")]
    pub dec: f32,
    #[serde(alias = "z", deserialize_with = "number_or_text")]
    pub dist: f32,
}

/// Manual-entry request: the star table plus presentation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualChartRequest {
    pub stars: Vec<ManualStar>,
    #[serde(deserialize_with = "number_or_text")]
    pub line_width: f32,
    #[serde(deserialize_with = "number_or_text")]
    pub star_size: f32,
}

fn number_or_text<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{}' is not a number", text))),
    }
}

impl ManualChartRequest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        common::serde::load_file(path)
    }

    pub fn records(&self) -> Vec<StarRecord> {
        self.stars
            .iter()
            .map(|star| StarRecord::new(star.name.clone(), star.ra, star.dec, star.dist))
            .collect()
    }

    /// `base` with this request's line width and marker size.
    pub fn editor_config(&self, base: &EditorConfig) -> EditorConfig {
        EditorConfig {
            line_width: self.line_width,
            marker_size: self.star_size,
            ..base.clone()
        }
    }
}
