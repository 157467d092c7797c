//! Popup placement relative to its anchor.
//!
//! The popup opens down and to the right of the anchor's center, inset so
//! the pointer that triggered it is already inside. It is then clamped to
//! the viewport. If clamping pushed the anchor point out of the popup's
//! horizontal span, the popup is shifted back until the anchor point is
//! `anchor_margin` inside it.

use evotip_ui::Rect;

use crate::config::TooltipConfig;

/// Computes the screen bounds of a popup of `size` opened from `anchor`.
#[must_use]
pub fn place_popup(anchor: Rect, size: (f32, f32), viewport: Rect, config: &TooltipConfig) -> Rect {
    let (ax, ay) = anchor.center();
    let (width, height) = size;

    let initial = Rect::new(ax - config.pointer_inset, ay - config.pointer_inset, width, height);
    let clamped = initial.clamp_within(&viewport);

    // The anchor wins over the viewport edge: a popup detached from its
    // cursor is worse than one slightly off-screen.
    let margin = config.anchor_margin.min(width * 0.5);
    let x = if ax < clamped.x {
        ax - margin
    } else if ax > clamped.right() {
        ax + margin - width
    } else {
        clamped.x
    };

    clamped.with_origin(x, clamped.y)
}
