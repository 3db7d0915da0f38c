use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_ROW_SIZE: i64 = 200;
pub const DEFAULT_COLUMN_SIZE: i64 = 400;
pub const DEFAULT_MARGIN: i64 = 10;

const CONFIG_DIR_NAME: &str = "dashgrid";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("column_size + margin must be positive, got {column_size} + {margin}")]
    NonPositiveColumnPitch { column_size: i64, margin: i64 },
    #[error("row_size + margin must be positive, got {row_size} + {margin}")]
    NonPositiveRowPitch { row_size: i64, margin: i64 },
    #[error("{axis}_size + margin overflows, got {size} + {margin}")]
    PitchOverflow {
        axis: &'static str,
        size: i64,
        margin: i64,
    },
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Pixel dimensions of the grid.
///
/// These only affect the conversion between cells and pixels: the number of
/// columns that fit a viewport and the final container height. Placement
/// itself works purely in cells.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GridSettings {
    /// Height of one grid row in pixels.
    pub row_size: i64,
    /// Width of one grid column in pixels.
    pub column_size: i64,
    /// Gap added between columns and between rows.
    pub margin: i64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            row_size: DEFAULT_ROW_SIZE,
            column_size: DEFAULT_COLUMN_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

pub(crate) fn checked_column_pitch(column_size: i64, margin: i64) -> Result<i64, ConfigError> {
    match column_size.checked_add(margin) {
        None => Err(ConfigError::PitchOverflow { axis: "column", size: column_size, margin }),
        Some(pitch) if pitch <= 0 => {
            Err(ConfigError::NonPositiveColumnPitch { column_size, margin })
        }
        Some(pitch) => Ok(pitch),
    }
}

fn checked_row_pitch(row_size: i64, margin: i64) -> Result<i64, ConfigError> {
    match row_size.checked_add(margin) {
        None => Err(ConfigError::PitchOverflow { axis: "row", size: row_size, margin }),
        Some(pitch) if pitch <= 0 => Err(ConfigError::NonPositiveRowPitch { row_size, margin }),
        Some(pitch) => Ok(pitch),
    }
}

impl GridSettings {
    /// Column width plus margin. Saturates; validated settings never do.
    pub fn column_pitch(&self) -> i64 { self.column_size.saturating_add(self.margin) }

    /// Row height plus margin. Saturates; validated settings never do.
    pub fn row_pitch(&self) -> i64 { self.row_size.saturating_add(self.margin) }

    pub fn validate(&self) -> Result<(), ConfigError> {
        checked_column_pitch(self.column_size, self.margin)?;
        checked_row_pitch(self.row_size, self.margin)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.grid.validate()?;
        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Loads `path` if given, otherwise the per-user config file.
    ///
    /// A missing per-user file is not an error; an explicitly requested one is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            debug!("loading config from {}", path.display());
            return Self::read(path);
        }

        let Some(path) = Self::default_path() else {
            trace!("no config directory available, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            trace!("{} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }
        debug!("loading config from {}", path.display());
        Self::read(&path)
    }
}
