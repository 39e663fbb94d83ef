//! Page settings and preferences
//!
//! Persisted in LocalStorage. Game state is never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::field::FieldConfig;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Live particle cap for this preset (links are O(n²))
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 300,
            QualityPreset::Medium => 1000,
            QualityPreset::High => 3000,
        }
    }
}

/// Page settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle quality preset
    pub quality: QualityPreset,

    // === Backdrop ===
    /// Particle backdrop on/off
    pub particles: bool,
    /// Particles created at load
    pub particle_count: usize,
    /// Max distance for connecting lines
    pub link_distance: f32,
    /// Pointer attraction radius
    pub pointer_radius: f32,

    // === Blackjack ===
    /// Chips at page load
    pub starting_balance: u64,

    // === Accessibility ===
    /// Reduced motion (no bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            particle_count: PARTICLE_COUNT,
            link_distance: LINK_DISTANCE,
            pointer_radius: POINTER_RADIUS,
            starting_balance: STARTING_BALANCE,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether button bursts should fire
    pub fn bursts_enabled(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Field tunables derived from these settings
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            pointer_radius: self.pointer_radius,
            link_distance: self.link_distance,
            max_particles: self.max_particles(),
            ..FieldConfig::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Complete JSON document, every field present
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "parlor_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.particle_count, 100);
        assert_eq!(s.starting_balance, 1000);
        assert_eq!(s.max_particles(), 1000);
        assert!(s.bursts_enabled());
    }

    #[test]
    fn test_preset_caps() {
        let low = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        assert_eq!(low.max_particles(), 300);
        assert_eq!(QualityPreset::High.max_particles(), 3000);
    }

    #[test]
    fn test_particles_off_disables_field() {
        let s = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(s.max_particles(), 0);
        assert_eq!(s.field_config().max_particles, 0);
        assert!(!s.bursts_enabled());
    }

    #[test]
    fn test_json_partial_and_malformed() {
        let s = Settings::from_json(r#"{"quality":"High","reduced_motion":true}"#);
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.reduced_motion);
        assert_eq!(s.particle_count, 100);

        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_saved_json_fills_missing_fields() {
        let partial = Settings::from_json(r#"{"particles":false}"#);
        let json = partial.to_json().unwrap();
        assert!(json.contains(r#""particle_count":100"#));
        assert!(json.contains(r#""starting_balance":1000"#));
        assert_eq!(Settings::from_json(&json), partial);
    }

    #[test]
    fn test_field_config_carries_overrides() {
        let s = Settings {
            link_distance: 90.0,
            pointer_radius: 120.0,
            ..Default::default()
        };
        let config = s.field_config();
        assert_eq!(config.link_distance, 90.0);
        assert_eq!(config.pointer_radius, 120.0);
        assert_eq!(config.link_fade, 1500.0);
    }
}
