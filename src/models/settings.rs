use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::palette::ColorPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    #[default]
    Skyline,
    Calendar,
}

impl std::fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisualizationType::Skyline => write!(f, "skyline"),
            VisualizationType::Calendar => write!(f, "calendar"),
        }
    }
}

impl FromStr for VisualizationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skyline" => Ok(VisualizationType::Skyline),
            "calendar" => Ok(VisualizationType::Calendar),
            other => Err(format!("unknown visualization type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkylineSettings {
    pub building_style: String,
    pub environment: String,
    pub reflections: bool,
    pub particles: bool,
    pub rotation_speed: f32,
}

impl Default for SkylineSettings {
    fn default() -> Self {
        Self {
            building_style: "modern".to_string(),
            environment: "city".to_string(),
            reflections: true,
            particles: true,
            rotation_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSettings {
    pub visualization_type: VisualizationType,
    pub color_palette: ColorPalette,
    pub show_legend: bool,
    pub animate_charts: bool,
    pub skyline: SkylineSettings,
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self {
            visualization_type: VisualizationType::default(),
            color_palette: ColorPalette::default(),
            show_legend: true,
            animate_charts: true,
            skyline: SkylineSettings::default(),
        }
    }
}

impl VisualizationSettings {
    pub fn contribution_color(&self, level: u8) -> &'static str {
        self.color_palette.level_color(level)
    }
}
