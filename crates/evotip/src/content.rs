//! # Popup Content
//!
//! Turns an item or arcana into a laid-out popup body. Sections are stacked
//! top to bottom and each contributes zero height when its data is absent:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ [icon] Title                 │  header
//! │ Wrapped description text     │  description
//! │ Evolution                    │
//! │ [a] + [b] → [c]              │  one row per distinct result
//! │ Arcana                       │
//! │ [m] Name                     │  one row per active arcana
//! └──────────────────────────────┘
//! ```
//!
//! Coordinates are relative to the popup's top-left corner; the view
//! translates them once the popup is placed.

use evotip_catalog::{DataProvider, ItemRef, ModifierRef, Recipe};
use evotip_ui::{wrap_text, Alignment, Layout, Rect, TextMetrics};

use crate::config::TooltipConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::subject::PopupSubject;

/// Joins ingredient icons in an evolution row.
pub const PLUS_GLYPH: &str = "+";
/// Separates ingredients from the result in an evolution row.
pub const ARROW_GLYPH: &str = "→";

const EVOLUTION_LABEL: &str = "Evolution";
const ARCANA_LABEL: &str = "Arcana";
const AFFECTS_LABEL: &str = "Affects";

/// How a line of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Header title.
    Title,
    /// Description and row names.
    Body,
    /// Section labels.
    Label,
    /// "+" and "→" between icons.
    Glyph,
}

/// One drawable piece of a popup.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A host sprite.
    Icon {
        /// Bounds relative to the popup origin.
        rect: Rect,
        /// Host sprite key.
        icon: String,
        /// Draw the owned-item ring.
        owned: bool,
        /// Popup opened when the icon is clicked.
        target: Option<PopupSubject>,
    },
    /// A single line of text.
    Text {
        /// Left edge relative to the popup origin.
        x: f32,
        /// Top edge relative to the popup origin.
        y: f32,
        /// Line content.
        text: String,
        /// Style.
        style: TextStyle,
    },
}

/// A displayed evolution: `ingredients` combine into `result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionRow {
    /// Ingredients in recipe order.
    pub ingredients: Vec<ItemRef>,
    /// Evolved item.
    pub result: ItemRef,
}

/// Height contributed by each section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionHeights {
    /// Icon and title.
    pub header: f32,
    /// Wrapped description lines.
    pub description: f32,
    /// Evolution label and rows, with leading spacing.
    pub evolution: f32,
    /// Arcana label and rows, with leading spacing.
    pub modifiers: f32,
    /// Affected-item label and grid, with leading spacing.
    pub affected: f32,
}

impl SectionHeights {
    /// Sum of all sections.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.header + self.description + self.evolution + self.modifiers + self.affected
    }
}

/// A laid-out popup body.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    /// What the popup describes.
    pub subject: PopupSubject,
    /// Popup width.
    pub width: f32,
    /// Popup height, padding included.
    pub height: f32,
    /// Per-section heights.
    pub sections: SectionHeights,
    /// Evolution rows shown, deduplicated by result.
    pub evolutions: Vec<EvolutionRow>,
    /// Arcana rows shown.
    pub modifiers: Vec<ModifierRef>,
    /// Items shown in an arcana's affected grid.
    pub affected: Vec<ItemRef>,
    /// Drawables, relative to the popup origin.
    pub elements: Vec<Element>,
}

impl PopupContent {
    /// Popup size as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Clickable icons and what they open.
    pub fn targets(&self) -> impl Iterator<Item = (Rect, PopupSubject)> + '_ {
        self.elements.iter().filter_map(|element| match element {
            Element::Icon {
                rect,
                target: Some(target),
                ..
            } => Some((*rect, *target)),
            _ => None,
        })
    }
}

/// Picks the evolution rows for an item.
///
/// Passive uses win over the item's own recipe; rows producing the same
/// result collapse into the first one seen.
#[must_use]
pub fn evolution_rows(provider: &dyn DataProvider, item: ItemRef) -> Vec<EvolutionRow> {
    let passive = provider.recipes_using(item);
    let recipes: Vec<Recipe> = if passive.is_empty() {
        provider.evolution_recipe(item).into_iter().collect()
    } else {
        passive
    };

    let mut rows: Vec<EvolutionRow> = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if rows.iter().any(|row| row.result == recipe.result) {
            continue;
        }
        rows.push(EvolutionRow {
            ingredients: recipe.ingredients,
            result: recipe.result,
        });
    }
    rows
}

/// Lays out popups from provider data.
pub struct PopupBuilder<'a> {
    config: &'a TooltipConfig,
    metrics: TextMetrics,
}

impl<'a> PopupBuilder<'a> {
    /// Creates a builder for the given layout constants.
    #[must_use]
    pub fn new(config: &'a TooltipConfig) -> Self {
        Self {
            config,
            metrics: TextMetrics::new(config.char_width, config.line_height),
        }
    }

    /// Builds the popup for `subject`.
    ///
    /// # Errors
    ///
    /// `UnknownItem` / `UnknownModifier` if the provider cannot describe the
    /// subject, `EmptyContent` if nothing would be drawn.
    pub fn build(&self, provider: &dyn DataProvider, subject: PopupSubject) -> OverlayResult<PopupContent> {
        match subject {
            PopupSubject::Item(item) => self.build_item(provider, item),
            PopupSubject::Modifier(modifier) => self.build_modifier(provider, modifier),
        }
    }

    fn build_item(&self, provider: &dyn DataProvider, item: ItemRef) -> OverlayResult<PopupContent> {
        let info = provider.describe(item).ok_or(OverlayError::UnknownItem(item))?;
        let mut cursor = Cursor::new(self.config, PopupSubject::Item(item));

        cursor.sections.header = self.header(&mut cursor, &info.icon, &info.name);
        cursor.sections.description = self.description(&mut cursor, &info.description);

        let rows = evolution_rows(provider, item);
        cursor.sections.evolution = self.evolution(&mut cursor, provider, rows);

        let modifiers = provider.active_modifiers(item);
        cursor.sections.modifiers = self.modifier_rows(&mut cursor, provider, &modifiers);

        cursor.finish()
    }

    fn build_modifier(&self, provider: &dyn DataProvider, modifier: ModifierRef) -> OverlayResult<PopupContent> {
        let info = provider
            .modifier_detail(modifier)
            .ok_or(OverlayError::UnknownModifier(modifier))?;
        let mut cursor = Cursor::new(self.config, PopupSubject::Modifier(modifier));

        cursor.sections.header = self.header(&mut cursor, &info.icon, &info.name);
        cursor.sections.description = self.description(&mut cursor, &info.description);
        cursor.sections.affected = self.affected_grid(&mut cursor, provider, &info.affected);

        cursor.finish()
    }

    fn header(&self, cursor: &mut Cursor, icon: &str, title: &str) -> f32 {
        if icon.is_empty() && title.is_empty() {
            return 0.0;
        }

        let cfg = self.config;
        let size = cfg.icon_cell.min(cfg.header_height);
        let top = cursor.y;

        if !icon.is_empty() {
            cursor.elements.push(Element::Icon {
                rect: Rect::new(cfg.padding, top + (cfg.header_height - size) * 0.5, size, size),
                icon: icon.to_string(),
                owned: false,
                target: None,
            });
        }
        if !title.is_empty() {
            cursor.elements.push(Element::Text {
                x: cfg.padding + size + 2.0 * cfg.row_gap,
                y: top + (cfg.header_height - cfg.line_height) * 0.5,
                text: title.to_string(),
                style: TextStyle::Title,
            });
        }

        cursor.y += cfg.header_height;
        cfg.header_height
    }

    fn description(&self, cursor: &mut Cursor, text: &str) -> f32 {
        let lines = wrap_text(text, self.config.content_width(), &self.metrics);
        let top = cursor.y;

        for (i, line) in lines.iter().enumerate() {
            cursor.elements.push(Element::Text {
                x: self.config.padding,
                y: top + self.metrics.block_height(i),
                text: line.clone(),
                style: TextStyle::Body,
            });
        }

        let height = self.metrics.block_height(lines.len());
        cursor.y += height;
        height
    }

    fn evolution(&self, cursor: &mut Cursor, provider: &dyn DataProvider, rows: Vec<EvolutionRow>) -> f32 {
        // Every icon in a row needs a sprite; drop rows the provider can't draw
        let drawable: Vec<(EvolutionRow, Vec<String>)> = rows
            .into_iter()
            .filter_map(|row| {
                let icons = row
                    .ingredients
                    .iter()
                    .chain(std::iter::once(&row.result))
                    .map(|&item| provider.describe(item).map(|info| info.icon))
                    .collect::<Option<Vec<_>>>();
                if icons.is_none() {
                    tracing::debug!(result = %row.result, "evolution row has an undescribed item");
                }
                icons.map(|icons| (row, icons))
            })
            .collect();

        if drawable.is_empty() {
            return 0.0;
        }

        let cfg = self.config;
        let start = cursor.y;
        cursor.y += cfg.section_spacing;
        cursor.label(EVOLUTION_LABEL);

        let glyph_width = 2.0 * cfg.char_width;
        let layout = Layout::new(cfg.row_gap).align_cross(Alignment::Center);

        for (i, (row, icons)) in drawable.into_iter().enumerate() {
            if i > 0 {
                cursor.y += cfg.row_gap;
            }

            // icon (+ icon)* → icon
            let count = row.ingredients.len();
            let mut sizes = Vec::with_capacity(2 * count + 1);
            for j in 0..count {
                if j > 0 {
                    sizes.push((glyph_width, cfg.line_height));
                }
                sizes.push((cfg.icon_cell, cfg.icon_cell));
            }
            sizes.push((glyph_width, cfg.line_height));
            sizes.push((cfg.icon_cell, cfg.icon_cell));

            let bounds = Rect::new(cfg.padding, cursor.y, cfg.content_width(), cfg.icon_cell);
            let rects = layout.row(bounds, &sizes);

            let mut slots = rects.into_iter();
            for (j, &ingredient) in row.ingredients.iter().enumerate() {
                if j > 0 {
                    if let Some(rect) = slots.next() {
                        cursor.glyph(rect, PLUS_GLYPH);
                    }
                }
                if let Some(rect) = slots.next() {
                    cursor.elements.push(Element::Icon {
                        rect,
                        icon: icons[j].clone(),
                        owned: provider.player_owns(ingredient),
                        target: Some(PopupSubject::Item(ingredient)),
                    });
                }
            }
            if let Some(rect) = slots.next() {
                cursor.glyph(rect, ARROW_GLYPH);
            }
            if let Some(rect) = slots.next() {
                cursor.elements.push(Element::Icon {
                    rect,
                    icon: icons[count].clone(),
                    owned: false,
                    target: Some(PopupSubject::Item(row.result)),
                });
            }

            cursor.y += cfg.icon_cell;
            cursor.evolutions.push(row);
        }

        cursor.y - start
    }

    fn modifier_rows(&self, cursor: &mut Cursor, provider: &dyn DataProvider, modifiers: &[ModifierRef]) -> f32 {
        let rows: Vec<_> = modifiers
            .iter()
            .filter_map(|&m| provider.modifier_detail(m).map(|info| (m, info)))
            .collect();
        if rows.is_empty() {
            return 0.0;
        }

        let cfg = self.config;
        let start = cursor.y;
        cursor.y += cfg.section_spacing;
        cursor.label(ARCANA_LABEL);

        for (i, (modifier, info)) in rows.into_iter().enumerate() {
            if i > 0 {
                cursor.y += cfg.row_gap;
            }
            cursor.elements.push(Element::Icon {
                rect: Rect::new(cfg.padding, cursor.y, cfg.icon_cell, cfg.icon_cell),
                icon: info.icon,
                owned: false,
                target: Some(PopupSubject::Modifier(modifier)),
            });
            cursor.elements.push(Element::Text {
                x: cfg.padding + cfg.icon_cell + 2.0 * cfg.row_gap,
                y: cursor.y + (cfg.icon_cell - cfg.line_height) * 0.5,
                text: info.name,
                style: TextStyle::Body,
            });
            cursor.y += cfg.icon_cell;
            cursor.modifiers.push(modifier);
        }

        cursor.y - start
    }

    fn affected_grid(&self, cursor: &mut Cursor, provider: &dyn DataProvider, affected: &[ItemRef]) -> f32 {
        let cells: Vec<_> = affected
            .iter()
            .filter_map(|&item| provider.describe(item).map(|info| (item, info.icon)))
            .collect();
        if cells.is_empty() {
            return 0.0;
        }

        let cfg = self.config;
        let start = cursor.y;
        cursor.y += cfg.section_spacing;
        cursor.label(AFFECTS_LABEL);

        let layout = Layout::new(cfg.row_gap);
        let width = cfg.content_width();
        let rects = layout.grid((cfg.padding, cursor.y), width, cfg.icon_cell, cells.len());

        for (rect, (item, icon)) in rects.into_iter().zip(cells.iter()) {
            cursor.elements.push(Element::Icon {
                rect,
                icon: icon.clone(),
                owned: provider.player_owns(*item),
                target: Some(PopupSubject::Item(*item)),
            });
            cursor.affected.push(*item);
        }

        cursor.y += layout.grid_height(width, cfg.icon_cell, cells.len());
        cursor.y - start
    }
}

/// Running layout state for one popup.
struct Cursor<'c> {
    config: &'c TooltipConfig,
    subject: PopupSubject,
    y: f32,
    sections: SectionHeights,
    evolutions: Vec<EvolutionRow>,
    modifiers: Vec<ModifierRef>,
    affected: Vec<ItemRef>,
    elements: Vec<Element>,
}

impl<'c> Cursor<'c> {
    fn new(config: &'c TooltipConfig, subject: PopupSubject) -> Self {
        Self {
            config,
            subject,
            y: config.padding,
            sections: SectionHeights::default(),
            evolutions: Vec::new(),
            modifiers: Vec::new(),
            affected: Vec::new(),
            elements: Vec::with_capacity(16),
        }
    }

    fn label(&mut self, text: &str) {
        self.elements.push(Element::Text {
            x: self.config.padding,
            y: self.y,
            text: text.to_string(),
            style: TextStyle::Label,
        });
        self.y += self.config.line_height;
    }

    fn glyph(&mut self, rect: Rect, glyph: &str) {
        self.elements.push(Element::Text {
            x: rect.x + (rect.width - self.config.char_width) * 0.5,
            y: rect.y,
            text: glyph.to_string(),
            style: TextStyle::Glyph,
        });
    }

    fn finish(self) -> OverlayResult<PopupContent> {
        if self.elements.is_empty() {
            return Err(OverlayError::EmptyContent(self.subject));
        }

        let height = self.sections.total() + 2.0 * self.config.padding;
        Ok(PopupContent {
            subject: self.subject,
            width: self.config.popup_width,
            height,
            sections: self.sections,
            evolutions: self.evolutions,
            modifiers: self.modifiers,
            affected: self.affected,
            elements: self.elements,
        })
    }
}
