//! Data-driven game balance
//!
//! Spawn cadence and scroll speed are coupled: the horizontal distance between
//! two consecutive obstacles is `spawn_cadence * scroll_speed`, which must stay
//! well above `obstacle_width` so there is always a path through.

use serde::{Deserialize, Serialize};

/// Gameplay constants, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/frame²)
    pub gravity: f32,
    /// Velocity set by an impulse (negative = upward)
    pub impulse_velocity: f32,
    /// Frames between obstacle spawns
    pub spawn_cadence: u64,
    /// Leftward obstacle displacement per frame
    pub scroll_speed: f32,
    /// Obstacle width
    pub obstacle_width: f32,
    /// Vertical clearance between the top and bottom pieces
    pub gap_size: f32,
    /// Minimum distance from the gap to the ceiling and to the floor
    pub min_margin: f32,
    /// Avatar's fixed horizontal position
    pub avatar_x: f32,
    /// Avatar bounding box width
    pub avatar_width: f32,
    /// Avatar bounding box height
    pub avatar_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            impulse_velocity: -4.6,
            spawn_cadence: 120,
            scroll_speed: 2.0,
            obstacle_width: 52.0,
            gap_size: 130.0,
            min_margin: 50.0,
            avatar_x: 50.0,
            avatar_width: 30.0,
            avatar_height: 30.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse `json` if there is any, falling back to the defaults on error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring bad tuning: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gapwing_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        Self::from_json_or_default(json.as_deref())
    }

    /// Load tuning overrides from the file named by `GAPWING_TUNING`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os("GAPWING_TUNING") else {
            return Self::from_json_or_default(None);
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json_or_default(Some(&json)),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation back into range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.spawn_cadence == 0 {
            self.spawn_cadence = defaults.spawn_cadence;
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            self.gravity = defaults.gravity;
        }
        // An impulse that doesn't push upward would make the game unplayable
        if !self.impulse_velocity.is_finite() || self.impulse_velocity >= 0.0 {
            self.impulse_velocity = defaults.impulse_velocity;
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed <= 0.0 {
            self.scroll_speed = defaults.scroll_speed;
        }

        for (value, fallback) in [
            (&mut self.obstacle_width, defaults.obstacle_width),
            (&mut self.gap_size, defaults.gap_size),
            (&mut self.avatar_width, defaults.avatar_width),
            (&mut self.avatar_height, defaults.avatar_height),
        ] {
            if !value.is_finite() || *value <= 0.0 {
                *value = fallback;
            }
        }

        if !self.min_margin.is_finite() {
            self.min_margin = defaults.min_margin;
        }
        self.min_margin = self.min_margin.max(0.0);
        if !self.avatar_x.is_finite() {
            self.avatar_x = defaults.avatar_x;
        }

        self
    }

    /// Horizontal distance between consecutive obstacles
    pub fn obstacle_spacing(&self) -> f32 {
        self.spawn_cadence as f32 * self.scroll_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing_leaves_clearance() {
        let tuning = Tuning::default();
        assert!(tuning.obstacle_spacing() > tuning.obstacle_width + tuning.avatar_width * 2.0);
    }

    #[test]
    fn test_from_json_partial() {
        let tuning = Tuning::from_json(r#"{ "gap_size": 170.0, "spawn_cadence": 100 }"#).unwrap();
        assert_eq!(tuning.gap_size, 170.0);
        assert_eq!(tuning.spawn_cadence, 100);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_or_default_falls_back() {
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
        assert_eq!(Tuning::from_json_or_default(Some("{ oops")), Tuning::default());

        let tuning = Tuning::from_json_or_default(Some(r#"{ "scroll_speed": 3.0 }"#));
        assert_eq!(tuning.scroll_speed, 3.0);
        assert_eq!(tuning.gap_size, Tuning::default().gap_size);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let tuning = Tuning {
            spawn_cadence: 0,
            impulse_velocity: 3.0,
            gap_size: -10.0,
            min_margin: -5.0,
            scroll_speed: f32::NAN,
            ..Default::default()
        }
        .sanitized();

        let defaults = Tuning::default();
        assert_eq!(tuning.spawn_cadence, defaults.spawn_cadence);
        assert_eq!(tuning.impulse_velocity, defaults.impulse_velocity);
        assert_eq!(tuning.gap_size, defaults.gap_size);
        assert_eq!(tuning.min_margin, 0.0);
        assert_eq!(tuning.scroll_speed, defaults.scroll_speed);
    }
}
