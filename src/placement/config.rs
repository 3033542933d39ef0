//! Placement configuration intake

use crate::core::errors::ReticleError;
use crate::geometry::snapping::SnapInterval;
use crate::geometry::template::TemplateShape;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON: &str = "icons/svg/dice-target.svg";
pub const DEFAULT_TAG: &str = "crosshairs";

/// Pixel offset applied to the label
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelOffset {
    pub x: f32,
    pub y: f32,
}

impl From<LabelOffset> for Vec2 {
    fn from(offset: LabelOffset) -> Self {
        Vec2::new(offset.x, offset.y)
    }
}

/// Parameters of one placement, fixed for the lifetime of a reticle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementConfig {
    pub x: f32,
    pub y: f32,
    /// Radius in half-grid units
    pub size: f32,
    pub texture: Option<String>,
    pub icon: String,
    pub label: String,
    pub label_offset: LabelOffset,
    /// Identifies this placement among concurrent previews
    pub tag: String,
    pub draw_icon: bool,
    pub draw_outline: bool,
    pub interval: SnapInterval,
    #[serde(rename = "t")]
    pub shape: TemplateShape,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            texture: None,
            icon: DEFAULT_ICON.to_string(),
            label: String::new(),
            label_offset: LabelOffset::default(),
            tag: DEFAULT_TAG.to_string(),
            draw_icon: true,
            draw_outline: true,
            interval: SnapInterval::default(),
            shape: TemplateShape::Circle,
        }
    }
}

impl PlacementConfig {
    /// Check and normalize the configuration
    ///
    /// Empty texture paths are treated as no texture, and non-finite label offsets
    /// are reset to zero.
    pub fn validate(mut self) -> Result<Self, ReticleError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ReticleError::InvalidSize(self.size));
        }
        if let SnapInterval::Every(0) = self.interval {
            return Err(ReticleError::InvalidInterval("0".to_string()));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            warn!("Non-finite reticle origin ({}, {}), using (0, 0)", self.x, self.y);
            self.x = 0.0;
            self.y = 0.0;
        }
        if self.texture.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.texture = None;
        }
        if !self.label_offset.x.is_finite() {
            self.label_offset.x = 0.0;
        }
        if !self.label_offset.y.is_finite() {
            self.label_offset.y = 0.0;
        }
        Ok(self)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlacementConfig::default();
        assert_eq!(config.size, 1.0);
        assert_eq!(config.interval, SnapInterval::Every(2));
        assert_eq!(config.tag, DEFAULT_TAG);
        assert!(config.draw_icon && config.draw_outline);
        assert_eq!(config.shape, TemplateShape::Circle);
    }

    #[test]
    fn test_validate_rejects_bad_size() {
        let config = PlacementConfig {
            size: 0.0,
            ..default()
        };
        assert_eq!(config.validate(), Err(ReticleError::InvalidSize(0.0)));

        let config = PlacementConfig {
            size: f32::NAN,
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_normalizes() {
        let config = PlacementConfig {
            texture: Some("  ".to_string()),
            label_offset: LabelOffset {
                x: f32::INFINITY,
                y: 3.0,
            },
            ..default()
        }
        .validate()
        .expect("valid config");

        assert_eq!(config.texture, None);
        assert_eq!(config.label_offset, LabelOffset { x: 0.0, y: 3.0 });
    }

    #[test]
    fn test_parse_from_json() {
        let json = r#"{
            "x": 10, "y": 20, "size": 2, "interval": "center",
            "label": "Summon", "labelOffset": {"x": 0, "y": -4},
            "tag": "wolf", "drawIcon": false, "texture": "tiles/wolf.png"
        }"#;
        let config: PlacementConfig = serde_json::from_str(json).expect("config parses");
        assert_eq!(config.origin(), Vec2::new(10.0, 20.0));
        assert_eq!(config.interval, SnapInterval::Center);
        assert_eq!(config.label_offset, LabelOffset { x: 0.0, y: -4.0 });
        assert_eq!(config.tag, "wolf");
        assert!(!config.draw_icon);
        assert!(config.draw_outline);
        assert_eq!(config.icon, DEFAULT_ICON);
        assert_eq!(config.texture.as_deref(), Some("tiles/wolf.png"));
    }

    #[test]
    fn test_parse_rejects_bad_interval() {
        let json = r#"{"interval": "diagonal"}"#;
        assert!(serde_json::from_str::<PlacementConfig>(json).is_err());
    }
}
