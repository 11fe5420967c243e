//! TOML settings.
//!
//! Default location: `~/.config/segforge/config.toml`. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::animator::Curve;
use crate::curves::Curves;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Glyph table, read at startup and written at exit.
    pub data: PathBuf,
    /// Export target.
    pub clipboard: PathBuf,
    pub log: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let runtime = dirs::runtime_dir().unwrap_or_else(std::env::temp_dir);

        Self {
            data: PathBuf::from("data.txt"),
            clipboard: runtime.join("segforge_clipboard"),
            log: PathBuf::from("segforge.log"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub fps: u32,
    pub character: CurveConfig,
    pub help: CurveConfig,
    pub outline: CurveConfig,
    pub button_size: CurveConfig,
    pub button_color: CurveConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let curves = Curves::default();

        Self {
            fps: 60,
            character: curves.character.into(),
            help: curves.help.into(),
            outline: curves.outline.into(),
            button_size: curves.button_size.into(),
            button_color: curves.button_color.into(),
        }
    }
}

impl AnimationConfig {
    pub fn curves(&self) -> Result<Curves> {
        Ok(Curves {
            character: self.character.to_curve()?,
            help: self.help.to_curve()?,
            outline: self.outline.to_curve()?,
            button_size: self.button_size.to_curve()?,
            button_color: self.button_color.to_curve()?,
        })
    }

    /// Never shorter than one millisecond.
    pub fn frame_interval(&self) -> Duration {
        (Duration::from_secs(1) / self.fps.max(1)).max(Duration::from_millis(1))
    }
}

/// Unvalidated curve as written in the file. All three keys are required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    pub frequency: f32,
    pub damping: f32,
    pub response: f32,
}

impl CurveConfig {
    pub fn to_curve(&self) -> Result<Curve> {
        Curve::new(self.frequency, self.damping, self.response)
    }
}

impl From<Curve> for CurveConfig {
    fn from(curve: Curve) -> Self {
        Self {
            frequency: curve.frequency(),
            damping: curve.damping(),
            response: curve.response(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("segforge").join("config.toml"))
    }

    /// Reads `path`, falling back to [`Config::default_path`]. A missing file
    /// is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::parse(&text).map_err(|source| Error::Config {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
