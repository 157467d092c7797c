//! Core widget types.

use std::fmt;

use crate::layout::Rect;

/// Stable identifier of a mirrored widget.
///
/// For host widgets this is the host's instance id; popup widgets created by
/// the overlay draw ids from [`WidgetTree::next_id`](super::WidgetTree::next_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Widget state flags (bitfield for efficiency).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget receives pointer input.
    pub const INTERACTIVE: u32 = 1 << 1;
    /// Pointer is currently over the widget.
    pub const HOVERED: u32 = 1 << 2;
    /// Widget was created by the overlay rather than mirrored from the host.
    pub const OVERLAY: u32 = 1 << 3;

    /// Default flags for a mirrored host widget.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::INTERACTIVE);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// Mirrored state of a single widget.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Host object name, used to recognise top-level views.
    pub name: String,
    /// Screen rectangle.
    pub rect: Rect,
    /// State flags.
    pub flags: WidgetFlags,
    /// Parent widget ID (None for root).
    pub parent: Option<WidgetId>,
}

impl WidgetState {
    /// Creates a new unnamed widget state.
    #[must_use]
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            name: String::new(),
            rect: Rect::ZERO,
            flags: WidgetFlags::DEFAULT,
            parent: None,
        }
    }

    /// Sets the host object name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the screen rectangle.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Marks the widget as owned by the overlay.
    #[must_use]
    pub fn overlay(mut self) -> Self {
        self.flags.set(WidgetFlags::OVERLAY);
        self
    }

    /// Returns true if the widget is visible.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE)
    }

    /// Returns true if the widget is hovered.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Returns true if the widget accepts pointer input and is visible.
    #[inline]
    #[must_use]
    pub fn accepts_pointer(&self) -> bool {
        self.is_visible() && self.flags.has(WidgetFlags::INTERACTIVE)
    }
}
