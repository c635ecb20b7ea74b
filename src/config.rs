use std::fs;
use std::path::Path;
use std::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{InkError, InkResult};
use crate::session::Mode;

/// Settings a drawing session starts from.
///
/// Missing fields fall back to their defaults when deserializing, so older
/// config files keep loading after new options are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// Ink and fill color
    pub brush_color: Color32,
    /// Stroke diameter in pixels
    pub brush_width: f32,
    pub mode: Mode,
    /// How many snapshots the undo history keeps
    pub history_limit: usize,
    /// Draw ticks per second
    pub tick_rate_hz: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            brush_color: Color32::BLACK,
            brush_width: 4.0,
            mode: Mode::Draw,
            history_limit: 100,
            tick_rate_hz: 60,
        }
    }
}

impl SessionConfig {
    /// Parse a config from JSON and check it
    pub fn from_json_str(json: &str) -> InkResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> InkResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> InkResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn validate(&self) -> InkResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(InkError::InvalidArgument(format!(
                "raster must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.brush_width.is_finite() && self.brush_width > 0.0) {
            return Err(InkError::InvalidArgument(format!(
                "brush width must be positive, got {}",
                self.brush_width
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(InkError::InvalidArgument("tick rate must be non-zero".to_owned()));
        }
        Ok(())
    }

    /// Time between two draw ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.tick_rate_hz.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "width": 32, "height": 16, "mode": "Erase" }"#).unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 16);
        assert_eq!(config.mode, Mode::Erase);
        assert_eq!(config.history_limit, SessionConfig::default().history_limit);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "width": 0 }"#),
            Err(InkError::InvalidArgument(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "brush_width": -1.0 }"#),
            Err(InkError::InvalidArgument(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "tick_rate_hz": 0 }"#),
            Err(InkError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            SessionConfig::from_json_str("{ width: "),
            Err(InkError::Config(_))
        ));
    }

    #[test]
    fn test_tick_interval() {
        let config = SessionConfig {
            tick_rate_hz: 50,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("inkpad-config-{}.json", uuid::Uuid::new_v4()));
        let config = SessionConfig {
            width: 64,
            brush_color: Color32::RED,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = SessionConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
