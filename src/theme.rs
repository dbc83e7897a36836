use crate::error::Result;
use crate::render::{ColorPair, Rgb};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub colors: ColorPair,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Rgb::new(15, 23, 42),
                colors: ColorPair {
                    dot: Rgb::new(96, 165, 250),
                    line: Rgb::new(148, 163, 184),
                },
            },
            Theme::Light => Palette {
                background: Rgb::new(248, 250, 252),
                colors: ColorPair {
                    dot: Rgb::new(37, 99, 235),
                    line: Rgb::new(100, 116, 139),
                },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Stored {
    theme: Theme,
}

/// Remembers the chosen theme between runs in a small JSON file.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ThemeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `Ok(None)` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Theme>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: Stored = serde_json::from_str(&contents)?;
        Ok(Some(stored.theme))
    }

    pub async fn save(&self, theme: Theme) -> Result<()> {
        let contents = serde_json::to_string(&Stored { theme })?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
