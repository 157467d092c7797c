//! Error types for the tooltip overlay.
//!
//! These never reach the host: the session logs them and drops the popup.

use evotip_catalog::{ItemRef, ModifierRef};
use evotip_ui::WidgetId;
use thiserror::Error;

use crate::subject::PopupSubject;

/// Errors that can occur while opening a popup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// No known top-level view above the anchor.
    #[error("no known view above anchor {0}")]
    ViewportNotFound(WidgetId),

    /// The anchor widget is not in the mirror.
    #[error("anchor {0} is not in the widget tree")]
    AnchorMissing(WidgetId),

    /// The provider returned nothing to show.
    #[error("nothing to show for {0}")]
    EmptyContent(PopupSubject),

    /// The provider does not know the item.
    #[error("unknown item: {0}")]
    UnknownItem(ItemRef),

    /// The provider does not know the arcana.
    #[error("unknown arcana: {0}")]
    UnknownModifier(ModifierRef),

    /// Configuration rejected at load time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for OverlayError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
