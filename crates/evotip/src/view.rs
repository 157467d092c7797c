//! A popup materialized in the widget mirror.
//!
//! The popup root is inserted under its viewport; every clickable icon gets
//! its own child widget so drill-down anchors live inside the popup subtree.

use evotip_ui::{Color, Rect, RenderCommand, Theme, UIRenderer, WidgetId, WidgetState, WidgetTree};

use crate::content::{Element, PopupContent, TextStyle};
use crate::error::{OverlayError, OverlayResult};
use crate::subject::PopupSubject;

/// Name given to popup root widgets.
pub const POPUP_WIDGET_NAME: &str = "EvotipPopup";
/// Name given to clickable icon widgets inside a popup.
pub const POPUP_ICON_NAME: &str = "EvotipPopupIcon";

const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 13.0;

/// A live popup.
#[derive(Debug, Clone)]
pub struct PopupView {
    root: WidgetId,
    bounds: Rect,
    content: PopupContent,
    targets: Vec<(WidgetId, PopupSubject)>,
}

impl PopupView {
    /// Inserts the popup under `parent` at `bounds`.
    ///
    /// # Errors
    ///
    /// `ViewportNotFound` if `parent` is no longer mirrored.
    pub fn materialize(
        tree: &mut WidgetTree,
        parent: WidgetId,
        content: PopupContent,
        bounds: Rect,
    ) -> OverlayResult<Self> {
        let root = tree.next_id();
        let state = WidgetState::new(root)
            .with_name(POPUP_WIDGET_NAME)
            .with_rect(bounds)
            .overlay();
        if !tree.add_child(parent, state) {
            return Err(OverlayError::ViewportNotFound(parent));
        }

        let mut targets = Vec::new();
        for (rect, subject) in content.targets() {
            let id = tree.next_id();
            let icon = WidgetState::new(id)
                .with_name(POPUP_ICON_NAME)
                .with_rect(rect.translate(bounds.x, bounds.y))
                .overlay();
            if tree.add_child(root, icon) {
                targets.push((id, subject));
            }
        }

        Ok(Self {
            root,
            bounds,
            content,
            targets,
        })
    }

    /// Removes the popup and its icons from the mirror.
    pub fn destroy(&self, tree: &mut WidgetTree) {
        tree.remove(self.root);
    }

    /// Root widget.
    #[must_use]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Screen bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Laid-out content.
    #[must_use]
    pub fn content(&self) -> &PopupContent {
        &self.content
    }

    /// Clickable icon widgets and what they open.
    #[must_use]
    pub fn targets(&self) -> &[(WidgetId, PopupSubject)] {
        &self.targets
    }

    /// Emits draw commands for the popup into its own batch.
    pub fn render(&self, theme: &Theme, renderer: &mut UIRenderer, z_index: i32) {
        let Rect { x: ox, y: oy, .. } = self.bounds;

        renderer.begin_batch(z_index);
        renderer.push(RenderCommand::Rect {
            bounds: self.bounds,
            color: theme.background,
            corner_radius: theme.corner_radius,
        });
        renderer.push(RenderCommand::RectOutline {
            bounds: self.bounds,
            color: theme.border,
            width: theme.border_width,
            corner_radius: theme.corner_radius,
        });

        renderer.push_clip(self.bounds);
        for element in &self.content.elements {
            match element {
                Element::Icon { rect, icon, owned, .. } => {
                    let bounds = rect.translate(ox, oy);
                    renderer.push(RenderCommand::Icon {
                        bounds,
                        icon: icon.clone(),
                        color: Color::WHITE,
                    });
                    if *owned {
                        renderer.push(RenderCommand::RectOutline {
                            bounds: bounds.expand(theme.ring_width),
                            color: theme.owned_ring,
                            width: theme.ring_width,
                            corner_radius: theme.corner_radius,
                        });
                    }
                }
                Element::Text { x, y, text, style } => {
                    let (color, font_size) = match style {
                        TextStyle::Title => (theme.title, TITLE_FONT_SIZE),
                        TextStyle::Body => (theme.text, BODY_FONT_SIZE),
                        TextStyle::Label | TextStyle::Glyph => (theme.text_muted, BODY_FONT_SIZE),
                    };
                    renderer.push(RenderCommand::Text {
                        text: text.clone(),
                        x: ox + x,
                        y: oy + y,
                        color,
                        font_size,
                    });
                }
            }
        }
        renderer.pop_clip();
    }
}
