//! Configuration persistence for roiselect settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::ControlMode;

/// Serializable RGB color, components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for RoiColor {
    fn default() -> Self {
        // Red
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl RoiColor {
    pub const WHITE: RoiColor = RoiColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255), fully opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        self.with_alpha(255)
    }

    /// Convert to RGBA bytes with the given alpha
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            alpha,
        ]
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiSelectConfig {
    /// Smallest width and height, in display pixels, a drawn ROI must reach
    pub min_roi_size: f32,
    /// Whether to draw the type label plate above each ROI
    pub show_labels: bool,
    /// Whether to draw resize handles on the selected ROI
    pub show_handles: bool,
    /// Editable or read-only viewer
    pub mode: ControlMode,
    /// Re-enter create mode after every finished draw
    pub auto_continue: bool,
    /// Viewport fill behind the letterboxed image
    pub background: RoiColor,
    /// Type registered when the annotator starts
    pub default_type: String,
    /// Color of the default type
    pub default_color: RoiColor,
    /// Line template for text export; `{x} {y} {w} {h}` placeholders
    pub export_line_format: String,
    /// Lowercase extensions, with leading dot, treated as images
    pub image_extensions: Vec<String>,
    /// Folder opened last time
    pub last_folder: Option<PathBuf>,
}

impl Default for RoiSelectConfig {
    fn default() -> Self {
        Self {
            min_roi_size: 10.0,
            show_labels: true,
            show_handles: true,
            mode: ControlMode::Configuration,
            auto_continue: true,
            // Dark grey viewport
            background: RoiColor::from_rgb8(64, 64, 64),
            default_type: "Default".to_string(),
            default_color: RoiColor::default(),
            export_line_format: "{x} {y} {w} {h}".to_string(),
            image_extensions: [".png", ".jpg", ".jpeg", ".bmp", ".gif", ".tif", ".tiff"]
                .into_iter()
                .map(String::from)
                .collect(),
            last_folder: None,
        }
    }
}

impl RoiSelectConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "roiselect";

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
