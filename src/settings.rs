//! Engine settings with persistence
//!
//! Settings are saved to `~/.config/skylark/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use skylark_core::TimeConfig;
use skylark_game::DEFAULT_BUFFER_TIME;
use tracing::{info, warn};

/// All engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub time: TimeConfig,
    pub input: InputSettings,
    pub demo: DemoSettings,
}

impl EngineSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skylark"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Whether a settings file is present on disk
    pub fn exists() -> bool {
        Self::settings_path().is_some_and(|p| p.exists())
    }

    /// Parse settings from TOML; missing sections keep their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Seconds a jump or attack press stays buffered
    pub buffer_time: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            buffer_time: DEFAULT_BUFFER_TIME,
        }
    }
}

/// Headless demo run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Simulated frames per second
    pub frame_rate: f32,
    /// Length of the scripted run in seconds
    pub duration: f32,
    /// Log debug stats every N frames (0 = never)
    pub stats_interval: u32,
    /// Write the tunables file back when the run ends
    pub save_tunables: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            duration: 6.0,
            stats_interval: 30,
            save_tunables: false,
        }
    }
}

impl DemoSettings {
    /// Raw delta of one simulated frame
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1.0)
    }

    pub fn frame_count(&self) -> u32 {
        (self.duration.max(0.0) * self.frame_rate.max(1.0)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = EngineSettings::parse("[input]\nbuffer_time = 0.15\n").unwrap();
        assert_eq!(settings.input.buffer_time, 0.15);
        assert_eq!(settings.time.fixed_timestep, TimeConfig::default().fixed_timestep);
        assert_eq!(settings.demo.frame_rate, 60.0);
    }

    #[test]
    fn test_demo_frame_count() {
        let demo = DemoSettings {
            frame_rate: 50.0,
            duration: 2.0,
            ..Default::default()
        };
        assert_eq!(demo.frame_count(), 100);
        assert_eq!(demo.frame_delta(), 0.02);
    }
}
