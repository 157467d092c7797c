//! # Tooltip Configuration
//!
//! Timing and layout constants, loaded once when the overlay attaches.
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! exit_delay_frames = 10
//! dwell_delay = 1.0
//! popup_width = 320.0
//! viewport_names = ["LevelUpView", "PauseView"]
//! ```

use serde::Deserialize;

use crate::error::{OverlayError, OverlayResult};

/// Overlay configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Frames between a pointer exit and its collapse check.
    pub exit_delay_frames: u32,
    /// Seconds the pointer must rest on a collection icon.
    pub dwell_delay: f32,
    /// Seconds between icon scans while paused.
    pub scan_interval: f32,
    /// Capacity of the discovery feed.
    pub feed_capacity: usize,

    /// Fixed popup width.
    pub popup_width: f32,
    /// Inner padding on every side.
    pub padding: f32,
    /// Space above the evolution, arcana and affected-item sections.
    pub section_spacing: f32,
    /// Height of the icon + title header.
    pub header_height: f32,
    /// Height of one line of text.
    pub line_height: f32,
    /// Average glyph advance used for wrapping.
    pub char_width: f32,
    /// Side of one item icon cell.
    pub icon_cell: f32,
    /// Gap between rows and between icons in a row.
    pub row_gap: f32,
    /// How far inside the popup the anchor point starts.
    pub pointer_inset: f32,
    /// Minimum horizontal distance between the anchor point and a popup edge.
    pub anchor_margin: f32,

    /// Names of the host views a popup may live in.
    pub viewport_names: Vec<String>,
    /// View hosting collection-screen popups.
    pub collection_viewport_name: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            exit_delay_frames: 10,
            dwell_delay: 1.0,
            scan_interval: 0.5,
            feed_capacity: 1024,
            popup_width: 320.0,
            padding: 8.0,
            section_spacing: 6.0,
            header_height: 40.0,
            line_height: 16.0,
            char_width: 8.0,
            icon_cell: 32.0,
            row_gap: 4.0,
            pointer_inset: 12.0,
            anchor_margin: 24.0,
            viewport_names: [
                "LevelUpView",
                "PauseView",
                "ItemFoundView",
                "ArcanaView",
                "CollectionView",
                "MerchantView",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            collection_viewport_name: "CollectionView".to_string(),
        }
    }
}

impl TooltipConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document does not parse or fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> OverlayResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks sizes and view names.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> OverlayResult<()> {
        let sizes = [
            ("popup_width", self.popup_width),
            ("header_height", self.header_height),
            ("line_height", self.line_height),
            ("char_width", self.char_width),
            ("icon_cell", self.icon_cell),
        ];
        for (field, value) in sizes {
            if value.is_nan() || value <= 0.0 {
                return Err(OverlayError::InvalidConfig(format!("{field} must be positive")));
            }
        }

        let offsets = [
            ("padding", self.padding),
            ("section_spacing", self.section_spacing),
            ("row_gap", self.row_gap),
            ("pointer_inset", self.pointer_inset),
            ("anchor_margin", self.anchor_margin),
            ("dwell_delay", self.dwell_delay),
            ("scan_interval", self.scan_interval),
        ];
        for (field, value) in offsets {
            if value.is_nan() || value < 0.0 {
                return Err(OverlayError::InvalidConfig(format!("{field} must not be negative")));
            }
        }

        if 2.0 * self.padding >= self.popup_width {
            return Err(OverlayError::InvalidConfig(
                "padding leaves no room for content".to_string(),
            ));
        }
        if self.feed_capacity == 0 {
            return Err(OverlayError::InvalidConfig("feed_capacity must be positive".to_string()));
        }
        if self.viewport_names.is_empty() {
            return Err(OverlayError::InvalidConfig("viewport_names is empty".to_string()));
        }
        if !self.viewport_names.contains(&self.collection_viewport_name) {
            return Err(OverlayError::InvalidConfig(format!(
                "collection view {:?} is not a known view",
                self.collection_viewport_name
            )));
        }
        Ok(())
    }

    /// Width available to content inside the padding.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.popup_width - 2.0 * self.padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = TooltipConfig::from_toml_str("").unwrap();
        assert_eq!(config, TooltipConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = TooltipConfig::from_toml_str("exit_delay_frames = 4\npopup_width = 400.0").unwrap();
        assert_eq!(config.exit_delay_frames, 4);
        assert!((config.popup_width - 400.0).abs() < f32::EPSILON);
        assert!((config.padding - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let err = TooltipConfig::from_toml_str("icon_cell = 0.0").unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(msg) if msg.contains("icon_cell")));
    }

    #[test]
    fn test_rejects_empty_views() {
        let err = TooltipConfig::from_toml_str("viewport_names = []").unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));
    }

    #[test]
    fn test_collection_view_must_be_known() {
        let source = "viewport_names = [\"PauseView\"]\ncollection_viewport_name = \"Elsewhere\"";
        assert!(TooltipConfig::from_toml_str(source).is_err());
    }

    #[test]
    fn test_parse_error_is_invalid_config() {
        let err = TooltipConfig::from_toml_str("popup_width = \"wide\"").unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));
    }
}
