use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logging options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,

    /// Also write events to a timestamped file
    pub log_to_file: bool,

    /// Directory for log files, defaults to `./logs`
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_dir: None,
        }
    }
}

/// Options controlling how a NightOwls root is turned into a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Annotated segments to load, in order
    pub segments: Vec<String>,

    /// Add the unannotated "testing" segment when its directory exists
    pub include_testing: bool,

    /// Keep boxes of the "ignore" category and annotations flagged as ignored
    pub include_ignore: bool,

    /// Drop data whose image file is missing on disk
    pub skip_missing_images: bool,

    /// File extensions accepted when listing unannotated images
    pub image_extensions: Vec<String>,

    pub logging: LogConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            segments: vec!["training".to_string(), "validation".to_string()],
            include_testing: true,
            include_ignore: true,
            skip_missing_images: false,
            image_extensions: vec!["png".to_string()],
            logging: LogConfig::default(),
        }
    }
}

impl LoaderConfig {
    /// Path of the settings file in the platform config directory
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "nightowls", "nightowls-dataset")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the platform config directory, or defaults if missing or corrupted
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => {
                warn!("Could not determine config directory. Using defaults.");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file, or defaults if missing or corrupted
    pub fn load_from(config_path: &Path) -> Self {
        info!("Loading settings from: {:?}", config_path);

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str::<LoaderConfig>(&contents) {
                Ok(config) => {
                    info!("Successfully loaded settings");
                    return config;
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}. Using defaults.", e);
                }
            },
            Err(e) => {
                // It's normal for the file not to exist on first run
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to read settings file: {}. Using defaults.", e);
                } else {
                    info!("No settings file found. Using defaults.");
                }
            }
        }

        Self::default()
    }

    /// Save settings to the platform config directory
    pub fn save(&self) -> io::Result<PathBuf> {
        let config_path = Self::get_config_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
        })?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> io::Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;
        info!("Settings saved to: {:?}", config_path);
        Ok(())
    }

    /// Whether a file extension (without dot) is accepted as an image
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.segments, vec!["training", "validation"]);
        assert!(config.include_testing);
        assert!(config.include_ignore);
        assert!(!config.skip_missing_images);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.log_to_file);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.json");

        let config = LoaderConfig {
            segments: vec!["validation".to_string()],
            include_testing: false,
            include_ignore: false,
            skip_missing_images: true,
            image_extensions: vec!["png".to_string(), "jpg".to_string()],
            logging: LogConfig {
                level: "debug".to_string(),
                log_to_file: true,
                log_dir: Some(PathBuf::from("/var/log/nightowls")),
            },
        };
        config.save_to(&path).unwrap();

        let loaded = LoaderConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"include_testing": false, "logging": {"level": "warn"}}"#).unwrap();

        let loaded = LoaderConfig::load_from(&path);
        assert!(!loaded.include_testing);
        assert_eq!(loaded.segments, vec!["training", "validation"]);
        assert_eq!(loaded.logging.level, "warn");
        assert!(loaded.logging.log_dir.is_none());
    }

    #[test]
    fn test_corrupted_or_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        assert_eq!(LoaderConfig::load_from(&path), LoaderConfig::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(LoaderConfig::load_from(&path), LoaderConfig::default());
    }

    #[test]
    fn test_accepts_extension() {
        let config = LoaderConfig::default();
        assert!(config.accepts_extension("png"));
        assert!(config.accepts_extension("PNG"));
        assert!(!config.accepts_extension("txt"));
    }
}
