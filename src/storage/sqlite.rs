use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::models::VisualizationSettings;

const VISUALIZATION_TYPE: &str = "visualization-type";
const COLOR_PALETTE: &str = "color-palette";
const SHOW_LEGEND: &str = "show-legend";
const ANIMATE_CHARTS: &str = "animate-charts";
const SKYLINE_BUILDING_STYLE: &str = "skyline-building-style";
const SKYLINE_ENVIRONMENT: &str = "skyline-environment";
const SKYLINE_REFLECTIONS: &str = "skyline-reflections";
const SKYLINE_PARTICLES: &str = "skyline-particles";
const SKYLINE_ROTATION_SPEED: &str = "skyline-rotation-speed";

/// Key/value store for visualization preferences.
pub struct SettingsStore {
    conn: Connection,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_db()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    pub fn load(&self) -> Result<VisualizationSettings> {
        let stored = self.entries()?;
        // Start from defaults; unparseable values are skipped
        let mut settings = VisualizationSettings::default();

        let get = |key: &str| stored.get(key).map(String::as_str);
        let parse_bool = |key: &str| get(key).map(|v| v == "true");

        if let Some(kind) = get(VISUALIZATION_TYPE).and_then(|v| v.parse().ok()) {
            settings.visualization_type = kind;
        }
        if let Some(palette) = get(COLOR_PALETTE).and_then(|v| v.parse().ok()) {
            settings.color_palette = palette;
        }
        if let Some(show) = parse_bool(SHOW_LEGEND) {
            settings.show_legend = show;
        }
        if let Some(animate) = parse_bool(ANIMATE_CHARTS) {
            settings.animate_charts = animate;
        }
        if let Some(style) = get(SKYLINE_BUILDING_STYLE).filter(|v| !v.is_empty()) {
            settings.skyline.building_style = style.to_string();
        }
        if let Some(environment) = get(SKYLINE_ENVIRONMENT).filter(|v| !v.is_empty()) {
            settings.skyline.environment = environment.to_string();
        }
        if let Some(reflections) = parse_bool(SKYLINE_REFLECTIONS) {
            settings.skyline.reflections = reflections;
        }
        if let Some(particles) = parse_bool(SKYLINE_PARTICLES) {
            settings.skyline.particles = particles;
        }
        if let Some(speed) = get(SKYLINE_ROTATION_SPEED).and_then(|v| v.parse::<f32>().ok()) {
            // NaN/inf would break the renderer
            if speed.is_finite() {
                settings.skyline.rotation_speed = speed;
            }
        }

        Ok(settings)
    }

    pub fn save(&mut self, settings: &VisualizationSettings) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let rows = [
            (VISUALIZATION_TYPE, settings.visualization_type.to_string()),
            (COLOR_PALETTE, settings.color_palette.to_string()),
            (SHOW_LEGEND, settings.show_legend.to_string()),
            (ANIMATE_CHARTS, settings.animate_charts.to_string()),
            (SKYLINE_BUILDING_STYLE, settings.skyline.building_style.clone()),
            (SKYLINE_ENVIRONMENT, settings.skyline.environment.clone()),
            (SKYLINE_REFLECTIONS, settings.skyline.reflections.to_string()),
            (SKYLINE_PARTICLES, settings.skyline.particles.to_string()),
            (SKYLINE_ROTATION_SPEED, settings.skyline.rotation_speed.to_string()),
        ];

        // All keys land together or not at all
        let tx = self.conn.transaction()?;
        for (key, value) in rows {
            tx.execute(
                r#"
                INSERT INTO preferences (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value, updated_at],
            )?;
        }
        tx.commit()?;

        tracing::debug!("Saved visualization preferences");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn entries(&self) -> Result<HashMap<String, String>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM preferences")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<std::result::Result<HashMap<_, _>, _>>().map_err(Into::into)
    }
}
