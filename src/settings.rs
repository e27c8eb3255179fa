use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Base URL the original backend exposes out of the box.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/api/web/files";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub downloads: DownloadSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Where downloaded files land. None means the platform Downloads dir.
    pub directory: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                base_url: DEFAULT_SERVER_URL.to_string(),
            },
            downloads: DownloadSettings { directory: None },
        }
    }
}

impl AppSettings {
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("filedir-viewer");

        fs::create_dir_all(&config_dir)?;
        Ok(config_dir.join("settings.json"))
    }

    pub fn load() -> Result<Self> {
        let config_file = Self::config_path()?;

        log::debug!("Loading settings from: {:?}", config_file);

        if config_file.exists() {
            let contents = fs::read_to_string(&config_file)?;
            let settings: AppSettings = serde_json::from_str(&contents)
                .with_context(|| format!("Malformed settings file {:?}", config_file))?;
            log::info!("Settings loaded successfully");
            Ok(settings)
        } else {
            log::info!("No settings file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_path()?;

        log::debug!("Saving settings to: {:?}", config_file);

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_file, contents)?;

        log::info!("Settings saved successfully");
        Ok(())
    }

    /// Resolved download target: configured override, platform Downloads
    /// dir, home-relative fallback, then the current directory.
    pub fn download_dir(&self) -> PathBuf {
        self.downloads
            .directory
            .clone()
            .or_else(dirs::download_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let settings = AppSettings::default();
        assert_eq!(settings.server.base_url, DEFAULT_SERVER_URL);
        assert!(settings.downloads.directory.is_none());
    }

    #[test]
    fn test_configured_download_dir_wins() {
        let mut settings = AppSettings::default();
        settings.downloads.directory = Some(PathBuf::from("/tmp/dl"));
        assert_eq!(settings.download_dir(), PathBuf::from("/tmp/dl"));
    }

    #[test]
    fn test_settings_round_trip_json() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server.base_url, settings.server.base_url);
    }
}
