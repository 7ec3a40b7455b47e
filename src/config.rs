// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::io::table::TableLayout;

fn default_element_features() -> Vec<String> {
  ["H", "C", "N", "F", "Cl", "Br", "V", "Cu", "Zn", "Zr"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_metal_types() -> Vec<String> {
  ["V", "Cu", "Zn", "Zr"].iter().map(|s| s.to_string()).collect()
}

fn default_extension() -> String {
  ".cif".to_string()
}

// --- Errors ---

#[derive(Debug)]
pub enum ConfigError {
  Io(io::Error),
  Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ConfigError::Io(e) => write!(f, "Could not open config: {}", e),
      ConfigError::Parse(e) => write!(f, "Error parsing config: {}", e),
    }
  }
}

impl Error for ConfigError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      ConfigError::Io(e) => Some(e),
      ConfigError::Parse(e) => Some(e),
    }
  }
}

impl From<io::Error> for ConfigError {
  fn from(e: io::Error) -> Self {
    ConfigError::Io(e)
  }
}

impl From<serde_json::Error> for ConfigError {
  fn from(e: serde_json::Error) -> Self {
    ConfigError::Parse(e)
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  /// Elements reported as raw count columns
  #[serde(default = "default_element_features")]
  pub element_features: Vec<String>,

  /// Metals concatenated into the "metal type" column
  #[serde(default = "default_metal_types")]
  pub metal_types: Vec<String>,

  /// File suffix selecting structure files in the input directory
  #[serde(default = "default_extension")]
  pub extension: String,

  /// Adds per-carbon unsaturation and unit cell volume columns
  #[serde(default)]
  pub extended_descriptors: bool,

  /// Worker threads; rayon's default when unset
  #[serde(default)]
  pub threads: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      element_features: default_element_features(),
      metal_types: default_metal_types(),
      extension: default_extension(),
      extended_descriptors: false,
      threads: None,
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/moffeat/settings.json).
  /// Falls back to defaults; the message says what happened.
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if !path.exists() {
      return (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      );
    }
    match Self::load_from(&path) {
      Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
      Err(e) => (Self::default(), e.to_string()),
    }
  }

  /// Strict variant for an explicit path
  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> Result<PathBuf, ConfigError> {
    let path = Self::get_path();
    self.save_to(&path)?;
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    Ok(())
  }

  pub fn to_json(&self) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn layout(&self) -> TableLayout<'_> {
    TableLayout {
      element_features: &self.element_features,
      extended: self.extended_descriptors,
    }
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "moffeat", "moffeat") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
