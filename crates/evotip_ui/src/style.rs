//! Colors and the popup theme.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white; icons are drawn untinted with it.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Parchment gold used for titles.
    pub const GOLD: Self = Self::rgba(1.0, 0.84, 0.35, 1.0);
    /// Ring highlight for items the player owns.
    pub const OWNED: Self = Self::rgba(0.3, 1.0, 0.45, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Colors and stroke widths for popups.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Popup background.
    pub background: Color,
    /// Popup border.
    pub border: Color,
    /// Title text.
    pub title: Color,
    /// Body text.
    pub text: Color,
    /// Section labels and glyphs ("+", "→").
    pub text_muted: Color,
    /// Ring drawn around owned items.
    pub owned_ring: Color,
    /// Border width.
    pub border_width: f32,
    /// Ring width around owned items.
    pub ring_width: f32,
    /// Corner radius.
    pub corner_radius: f32,
}

impl Theme {
    /// Dark parchment theme matching the host's pause menus.
    pub const DUSK: Self = Self {
        background: Color::rgba(0.06, 0.05, 0.09, 0.96),
        border: Color::rgba(0.55, 0.45, 0.25, 1.0),
        title: Color::GOLD,
        text: Color::rgba(0.92, 0.92, 0.92, 1.0),
        text_muted: Color::rgba(0.6, 0.6, 0.65, 1.0),
        owned_ring: Color::OWNED,
        border_width: 2.0,
        ring_width: 2.0,
        corner_radius: 4.0,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DUSK
    }
}
