//! Editor configuration
//!
//! Plain structs with sensible defaults. [`EditorConfig::from_env`] layers a
//! handful of environment overrides on top of the defaults so the binary can
//! be tweaked without recompiling.

use cgmath::Vector3;

use crate::editor::pen::PenStyle;
use crate::logging::LoggingConfig;

/// Top-level configuration handed to [`crate::SketchApp`].
#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub pen: PenStyle,
    pub interaction: InteractionConfig,
    pub logging: LoggingConfig,
}

impl EditorConfig {
    /// Defaults with overrides from `SKETCHBOX_VSYNC`, `SKETCHBOX_MAX_PIXEL_RATIO`
    /// and `SKETCHBOX_FINALIZE_ON_MISS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(vsync) = lookup("SKETCHBOX_VSYNC").and_then(|v| parse_flag(&v)) {
            self.render.vsync = vsync;
        }
        if let Some(ratio) = lookup("SKETCHBOX_MAX_PIXEL_RATIO").and_then(|v| v.parse::<f64>().ok())
        {
            if ratio > 0.0 {
                self.render.max_pixel_ratio = ratio;
            }
        }
        if let Some(finalize) = lookup("SKETCHBOX_FINALIZE_ON_MISS").and_then(|v| parse_flag(&v)) {
            self.interaction.finalize_on_miss = finalize;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Window creation parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sketchbox".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Initial camera placement and orbit behavior.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Fraction of the pending orbit delta applied per frame
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vector3::new(3.0, 1.0, 3.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            fov_degrees: 50.0,
            znear: 0.001,
            zfar: 50000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            damping_factor: 0.05,
        }
    }
}

/// Directional light description.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Hemisphere (sky/ground) ambient light description.
#[derive(Debug, Clone, Copy)]
pub struct HemisphereLight {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub intensity: f32,
}

/// Renderer settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub clear_color: [f64; 3],
    /// Device pixel ratio is clamped to this value when sizing the surface
    pub max_pixel_ratio: f64,
    pub vsync: bool,
    pub sun: DirectionalLight,
    pub ambient: HemisphereLight,
    pub grid_size: f32,
    pub grid_divisions: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0xDD as f64 / 255.0; 3],
            max_pixel_ratio: 2.0,
            vsync: true,
            sun: DirectionalLight {
                position: [-5.0, 5.0, -5.0],
                color: [1.0, 1.0, 1.0],
                intensity: 2.0,
            },
            ambient: HemisphereLight {
                sky_color: [0xaa as f32 / 255.0, 0xaa as f32 / 255.0, 1.0],
                ground_color: [0x88 as f32 / 255.0, 1.0, 0x88 as f32 / 255.0],
                intensity: 0.1,
            },
            grid_size: 10.0,
            grid_divisions: 10,
        }
    }
}

/// Behavior switches for the interaction state machine.
#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// When the pointer is released over empty space, finish the stroke from
    /// the points collected so far. With `false` the stroke stays open until
    /// a later release lands on geometry.
    pub finalize_on_miss: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            finalize_on_miss: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_editor_scene() {
        let config = EditorConfig::default();
        assert_eq!(config.camera.eye, Vector3::new(3.0, 1.0, 3.0));
        assert_eq!(config.render.max_pixel_ratio, 2.0);
        assert!(config.interaction.finalize_on_miss);
        assert_eq!(config.render.grid_divisions, 10);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SKETCHBOX_VSYNC", "off"),
            ("SKETCHBOX_MAX_PIXEL_RATIO", "1.5"),
            ("SKETCHBOX_FINALIZE_ON_MISS", "false"),
        ]
        .into_iter()
        .collect();

        let mut config = EditorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert!(!config.render.vsync);
        assert_eq!(config.render.max_pixel_ratio, 1.5);
        assert!(!config.interaction.finalize_on_miss);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = EditorConfig::default();
        config.apply_overrides(|key| match key {
            "SKETCHBOX_MAX_PIXEL_RATIO" => Some("-3".to_string()),
            "SKETCHBOX_VSYNC" => Some("maybe".to_string()),
            _ => None,
        });

        assert!(config.render.vsync);
        assert_eq!(config.render.max_pixel_ratio, 2.0);
    }
}
