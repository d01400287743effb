use crate::core::constants::{
    DEFAULT_CAMERA_ZOOM, FASTEST_UPDATE_INTERVAL_MS, UPDATE_INTERVAL_MS,
};
use crate::platform::location::{LocationUpdateConfig, Priority};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Desired interval between location updates (milliseconds)
    pub update_interval_ms: u64,
    /// Fastest delivery interval the screen will accept (milliseconds)
    pub fastest_update_interval_ms: u64,
    /// Power/accuracy tradeoff requested from the provider
    pub priority: Priority,
    /// Zoom level applied when the camera is seeded (1-21)
    pub camera_zoom: u8,
    /// Enable the map's user-location layer when permitted
    pub user_location_layer: bool,
    /// Log every received fix
    pub log_each_fix: bool,
}

/// Configuration validation and I/O errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: UPDATE_INTERVAL_MS,
            fastest_update_interval_ms: FASTEST_UPDATE_INTERVAL_MS,
            priority: Priority::HighAccuracy,
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            user_location_layer: true,
            log_each_fix: true,
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    /// Check all parameters against their allowed ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "update_interval_ms".to_string(),
                value: self.update_interval_ms.to_string(),
                reason: "Update interval must be positive".to_string(),
            });
        }

        if self.fastest_update_interval_ms > self.update_interval_ms {
            return Err(ConfigError::InvalidParameter {
                parameter: "fastest_update_interval_ms".to_string(),
                value: self.fastest_update_interval_ms.to_string(),
                reason: "Fastest interval cannot exceed the update interval".to_string(),
            });
        }

        if self.camera_zoom < 1 || self.camera_zoom > 21 {
            return Err(ConfigError::InvalidParameter {
                parameter: "camera_zoom".to_string(),
                value: self.camera_zoom.to_string(),
                reason: "Camera zoom must be between 1 and 21".to_string(),
            });
        }

        Ok(())
    }

    /// Project the subscription parameters handed to the provider
    pub fn location_config(&self) -> LocationUpdateConfig {
        LocationUpdateConfig::new(
            self.update_interval_ms,
            self.fastest_update_interval_ms,
            self.priority,
        )
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.update_interval_ms, 3000);
        assert_eq!(config.fastest_update_interval_ms, 1500);
        assert_eq!(config.priority, Priority::HighAccuracy);
        assert_eq!(config.camera_zoom, 19);
        assert!(config.user_location_layer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let config = AppConfig {
            update_interval_ms: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "update_interval_ms"
        ));
    }

    #[test]
    fn test_validation_rejects_fastest_above_interval() {
        let config = AppConfig {
            update_interval_ms: 1000,
            fastest_update_interval_ms: 2000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zoom_out_of_range() {
        let too_low = AppConfig {
            camera_zoom: 0,
            ..Default::default()
        };
        assert!(too_low.validate().is_err());

        let too_high = AppConfig {
            camera_zoom: 22,
            ..Default::default()
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            update_interval_ms: 5000,
            fastest_update_interval_ms: 2500,
            priority: Priority::BalancedPower,
            camera_zoom: 17,
            user_location_layer: false,
            log_each_fix: false,
        };

        let temp_path = PathBuf::from("test_app_config.json");

        config.save_to_file(&temp_path).unwrap();
        let loaded = AppConfig::from_file(&temp_path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let temp_path = PathBuf::from("test_garbage_config.json");
        fs::write(&temp_path, "not json at all").unwrap();

        let result = AppConfig::from_file(&temp_path);
        assert!(matches!(
            result,
            Err(ConfigError::SerializationError { .. })
        ));

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let temp_path = PathBuf::from("test_invalid_config.json");
        let content = r#"{
            "update_interval_ms": 1000,
            "fastest_update_interval_ms": 4000,
            "priority": "HighAccuracy",
            "camera_zoom": 19,
            "user_location_layer": true,
            "log_each_fix": true
        }"#;
        fs::write(&temp_path, content).unwrap();

        let result = AppConfig::from_file(&temp_path);
        assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file("no_such_config_file.json");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn test_location_config_projection() {
        let config = AppConfig::default();
        let location = config.location_config();
        assert_eq!(location.interval_ms, 3000);
        assert_eq!(location.fastest_interval_ms, 1500);
        assert_eq!(location.priority, Priority::HighAccuracy);
        assert_eq!(location, LocationUpdateConfig::default());
    }
}
