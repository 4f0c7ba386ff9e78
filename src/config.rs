// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Draw2d configuration.
//!
//! ```toml
//! asset_root = "/opt/game/baseq2"
//! log_file = "log/draw2d.log"
//! log_level = "debug"
//! vid_width = 1024
//! vid_height = 768
//! fade_alpha = 0.6
//! ```
//!
//! Missing keys take their default value.

use crate::error::{DrawError, DrawResult};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draw2dConfig {
    /// root directory of game assets, relative paths are
    /// resolved from the project root
    pub asset_root: String,
    pub log_file: String,
    pub log_level: String,
    /// initial viewport, updated later by Draw2d::set_viewport
    pub vid_width: u32,
    pub vid_height: u32,
    /// alpha of the black fade_screen overlay
    pub fade_alpha: f32,
}

impl Default for Draw2dConfig {
    fn default() -> Self {
        Self {
            asset_root: ".".to_string(),
            log_file: "log/draw2d.log".to_string(),
            log_level: "info".to_string(),
            vid_width: 640,
            vid_height: 480,
            fade_alpha: 0.6,
        }
    }
}

impl Draw2dConfig {
    pub fn load(path: &str) -> DrawResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DrawError::Config(format!("read {} error: {}", path, e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> DrawResult<Self> {
        let cfg: Draw2dConfig =
            toml::from_str(s).map_err(|e| DrawError::Config(e.to_string()))?;
        if !(0.0..=1.0).contains(&cfg.fade_alpha) {
            return Err(DrawError::Config(format!(
                "fade_alpha {} out of range 0..1",
                cfg.fade_alpha
            )));
        }
        Ok(cfg)
    }

    pub fn level_filter(&self) -> DrawResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| DrawError::Config(format!("bad log level {}", self.log_level)))
    }
}
