//! Session settings layered on top of the map config.

use isomap_core::MapConfig;

/// Settings for a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub map: MapConfig,
    /// Camera scroll speed in pixels per second, per screen axis.
    pub scroll_speed: [f32; 2],
    /// Walker updates run by [`World::step_frame`](crate::World::step_frame).
    pub step_budget: usize,
    /// Screen rows above the map reserved for the menu bar.
    pub top_margin: i32,
    /// Screen rows below the map reserved for the tool panel.
    pub bottom_panel: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            scroll_speed: [1024.0, 1024.0],
            step_budget: 64,
            top_margin: 32,
            bottom_panel: 175,
        }
    }
}

impl WorldConfig {
    pub fn with_map(map: MapConfig) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: WorldConfig = serde_json::from_str(r#"{"step_budget": 8}"#).unwrap();
        assert_eq!(cfg.step_budget, 8);
        assert_eq!(cfg.top_margin, 32);
        assert_eq!(cfg.map, MapConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let cfg = WorldConfig {
            scroll_speed: [256.0, 512.0],
            ..WorldConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: WorldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
