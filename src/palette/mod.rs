pub mod languages;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use languages::{language_color, DEFAULT_LANGUAGE_COLOR};

/// Named color schemes for the five contribution levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPalette {
    #[default]
    Default,
    Github,
    Neon,
    Pastel,
    Monochrome,
    Cyberpunk,
    Gradient,
    Holographic,
    Sunset,
    Ocean,
    Synthwave,
    Aurora,
    Cosmic,
    Emerald,
    Ruby,
    Sapphire,
}

impl ColorPalette {
    pub const ALL: [ColorPalette; 16] = [
        ColorPalette::Default,
        ColorPalette::Github,
        ColorPalette::Neon,
        ColorPalette::Pastel,
        ColorPalette::Monochrome,
        ColorPalette::Cyberpunk,
        ColorPalette::Gradient,
        ColorPalette::Holographic,
        ColorPalette::Sunset,
        ColorPalette::Ocean,
        ColorPalette::Synthwave,
        ColorPalette::Aurora,
        ColorPalette::Cosmic,
        ColorPalette::Emerald,
        ColorPalette::Ruby,
        ColorPalette::Sapphire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorPalette::Default => "default",
            ColorPalette::Github => "github",
            ColorPalette::Neon => "neon",
            ColorPalette::Pastel => "pastel",
            ColorPalette::Monochrome => "monochrome",
            ColorPalette::Cyberpunk => "cyberpunk",
            ColorPalette::Gradient => "gradient",
            ColorPalette::Holographic => "holographic",
            ColorPalette::Sunset => "sunset",
            ColorPalette::Ocean => "ocean",
            ColorPalette::Synthwave => "synthwave",
            ColorPalette::Aurora => "aurora",
            ColorPalette::Cosmic => "cosmic",
            ColorPalette::Emerald => "emerald",
            ColorPalette::Ruby => "ruby",
            ColorPalette::Sapphire => "sapphire",
        }
    }

    pub fn colors(&self) -> [&'static str; 5] {
        match self {
            ColorPalette::Default => ["#121212", "#ff3b30", "#ff6b61", "#ff9c92", "#ffcdc8"],
            ColorPalette::Github => ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
            ColorPalette::Neon => ["#121212", "#00ffff", "#00ccff", "#0099ff", "#0066ff"],
            ColorPalette::Pastel => ["#f0f0f0", "#ffb5b5", "#ffd6a5", "#fdffb6", "#caffbf"],
            ColorPalette::Monochrome => ["#121212", "#2a2a2a", "#4a4a4a", "#6a6a6a", "#8a8a8a"],
            ColorPalette::Cyberpunk => ["#0d0221", "#ff2975", "#f222ff", "#8c1eff", "#ffd319"],
            ColorPalette::Gradient => ["#121212", "#7928ca", "#8a3ebd", "#9c55af", "#ad6ba2"],
            ColorPalette::Holographic => ["#121212", "#83eaf1", "#63a4ff", "#9d63ff", "#db49d8"],
            ColorPalette::Sunset => ["#121212", "#ff7e5f", "#feb47b", "#ffcda5", "#ffd8be"],
            ColorPalette::Ocean => ["#121212", "#006992", "#27476e", "#001d4a", "#0a1128"],
            ColorPalette::Synthwave => ["#120038", "#ff00ff", "#00ffff", "#fc199a", "#61ffca"],
            ColorPalette::Aurora => ["#121212", "#00ff87", "#60efff", "#0061ff", "#0f1f61"],
            ColorPalette::Cosmic => ["#121212", "#3a0ca3", "#4361ee", "#4cc9f0", "#7209b7"],
            ColorPalette::Emerald => ["#121212", "#004b23", "#006400", "#007200", "#008000"],
            ColorPalette::Ruby => ["#121212", "#590d22", "#800f2f", "#a4133c", "#c9184a"],
            ColorPalette::Sapphire => ["#121212", "#03045e", "#023e8a", "#0077b6", "#0096c7"],
        }
    }

    pub fn level_color(&self, level: u8) -> &'static str {
        let colors = self.colors();
        // Out-of-range levels fall back to the empty-day color
        colors.get(level as usize).copied().unwrap_or(colors[0])
    }
}

impl std::fmt::Display for ColorPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ColorPalette {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ColorPalette::ALL
            .iter()
            .copied()
            .find(|p| p.name() == lower)
            .ok_or_else(|| format!("unknown color palette: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette() {
        assert_eq!("github".parse::<ColorPalette>(), Ok(ColorPalette::Github));
        assert_eq!("Sapphire".parse::<ColorPalette>(), Ok(ColorPalette::Sapphire));
        assert!("plaid".parse::<ColorPalette>().is_err());
    }

    #[test]
    fn test_level_color_falls_back_to_level_zero() {
        let palette = ColorPalette::Github;
        assert_eq!(palette.level_color(4), "#216e39");
        assert_eq!(palette.level_color(9), "#ebedf0");
    }
}
