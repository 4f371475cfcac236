//! Application settings, loaded from JSON with per-field defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::Color;

pub const DEFAULT_CONFIG_PATH: &str = "rasterpaint.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Where the Save action writes the canvas (TGA)
    pub output_path: PathBuf,
    /// PNG drawn onto the canvas by the Load action
    pub image_path: PathBuf,
    /// Directory holding the toolbar icon PNGs
    pub icon_dir: PathBuf,
    pub particle_count: usize,
    pub border_width: i32,
    pub erase_radius: i32,
    pub initial_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            output_path: PathBuf::from("output.tga"),
            image_path: PathBuf::from("images/fruits.png"),
            icon_dir: PathBuf::from("images"),
            particle_count: 1000,
            border_width: 2,
            erase_radius: 5,
            initial_color: Color::RED,
        }
    }
}

impl Config {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paint.json");
        fs::write(
            &path,
            r#"{ "width": 320, "initial_color": { "r": 0, "g": 255, "b": 255 } }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.initial_color, Color::CYAN);
        assert_eq!(config.output_path, PathBuf::from("output.tga"));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paint.json");
        fs::write(&path, "{ width: ").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("absent.json")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = Config {
            vsync: false,
            particle_count: 10,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
