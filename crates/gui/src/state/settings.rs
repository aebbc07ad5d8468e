//! Application settings

use serde::{Deserialize, Serialize};

use super::session::PlacementConfig;

/// Placement constants as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Freeform placement distance in front of the camera (m)
    pub forward_offset: f32,
    /// Minimum spacing between placements of one drag (m)
    pub distance_threshold: f32,
    /// Gap between a surface and a placed object (m)
    pub surface_epsilon: f32,
    /// Template size multiplier
    pub unit_scale: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        let config = PlacementConfig::default();
        Self {
            forward_offset: config.forward_offset,
            distance_threshold: config.distance_threshold,
            surface_epsilon: config.surface_epsilon,
            unit_scale: config.unit_scale,
        }
    }
}

/// Detected surface overlay appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Fill color RGB
    pub color: [u8; 3],
    /// Fill opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            color: [128, 0, 128],
            opacity: 0.25,
        }
    }
}

/// Simulated device camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Walk speed in meters per second
    pub walk_speed: f32,
    /// Degrees of rotation per dragged pixel
    pub rotate_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            walk_speed: 1.0,
            rotate_sensitivity: 0.3,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Show the floor grid
    pub show_grid: bool,
    /// Grid cell size (m)
    pub grid_size: f32,
    /// Number of grid lines in each direction from origin
    pub grid_range: i32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            show_grid: true,
            grid_size: 0.25,
            grid_range: 8,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub placement: PlacementSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(dirs) = directories::ProjectDirs::from("com", "ardraw", "ardraw") else {
            return Self::default();
        };
        let config_path = dirs.config_dir().join("settings.json");
        let Ok(json) = std::fs::read_to_string(&config_path) else {
            return Self::default();
        };
        Self::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {e}", config_path.display());
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(dirs) = directories::ProjectDirs::from("com", "ardraw", "ardraw") else {
            return;
        };
        let config_dir = dirs.config_dir();
        if let Err(e) = std::fs::create_dir_all(config_dir) {
            tracing::warn!("Cannot create {}: {e}", config_dir.display());
            return;
        }
        let config_path = config_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&config_path, json) {
                    tracing::warn!("Cannot write {}: {e}", config_path.display());
                }
            }
            Err(e) => tracing::warn!("Cannot serialize settings: {e}"),
        }
    }

    /// Placement constants for the session
    pub fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            forward_offset: self.placement.forward_offset,
            distance_threshold: self.placement.distance_threshold,
            surface_epsilon: self.placement.surface_epsilon,
            unit_scale: self.placement.unit_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placement_config() {
        assert_eq!(AppSettings::default().placement_config(), PlacementConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = AppSettings::from_json(r#"{"placement": {"unit_scale": 0.01}}"#).unwrap();
        let config = settings.placement_config();
        assert_eq!(config.unit_scale, 0.01);
        assert_eq!(config.distance_threshold, 0.05);
        assert_eq!(settings.overlay.color, [128, 0, 128]);
    }

    #[test]
    fn test_invalid_json() {
        let err = AppSettings::from_json("{not json").unwrap_err();
        assert!(err.starts_with("Invalid settings JSON"));
    }
}
