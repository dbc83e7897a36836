use crate::error::Result;
use crate::theme::Theme;
use log::{debug, warn};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "constellation.json";
pub const REDUCED_MOTION_ENV: &str = "CONSTELLATION_REDUCED_MOTION";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub reduced_motion: bool,
    pub theme: Theme,
    pub theme_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 1024,
            height: 768,
            reduced_motion: false,
            theme: Theme::default(),
            theme_file: PathBuf::from("theme.json"),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Falls back to the defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                warn!("ignoring {}: {}", path.display(), err);
                Settings::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no {}, using default settings", path.display());
                Settings::default()
            }
            Err(err) => {
                warn!("cannot read {}: {}", path.display(), err);
                Settings::default()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPreference {
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn detect(settings: &Settings) -> Self {
        let env = std::env::var(REDUCED_MOTION_ENV).ok();
        Self::resolve(settings.reduced_motion, env.as_deref())
    }

    fn resolve(configured: bool, env: Option<&str>) -> Self {
        let from_env = matches!(
            env.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
            Some("1") | Some("true") | Some("yes")
        );
        if configured || from_env {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}
