//! Pointer routing.
//!
//! Hosts that cannot deliver per-widget enter/exit events hand the overlay
//! their raw pointer state instead. The router hit-tests it against open
//! popups and hover-wired icons and synthesizes the events:
//!
//! - The topmost popup under the pointer is hovered.
//! - Icons are only hovered when no popup covers the pointer.
//! - Exits are reported before enters.

use evotip_ui::{InputState, MouseButton, WidgetFlags, WidgetId, WidgetTree};

/// A synthesized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer entered the widget.
    Enter(WidgetId),
    /// Pointer left the widget.
    Exit(WidgetId),
    /// Left button pressed over the widget.
    Click(WidgetId),
}

/// Derives enter/exit/click from per-frame pointer state.
#[derive(Debug, Default)]
pub struct PointerRouter {
    hovered: Option<WidgetId>,
}

impl PointerRouter {
    /// Creates a router with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self { hovered: None }
    }

    /// Widget currently hovered.
    #[must_use]
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Forgets the hovered widget without emitting an exit.
    pub fn clear(&mut self) {
        self.hovered = None;
    }

    /// Routes one frame of pointer state.
    ///
    /// `popups` are popup roots, bottom first. `icons` are hover-wired
    /// widgets; `targets` are clickable icons inside popups.
    pub fn route(
        &mut self,
        tree: &mut WidgetTree,
        input: &InputState,
        popups: &[WidgetId],
        icons: impl IntoIterator<Item = WidgetId>,
        targets: impl IntoIterator<Item = WidgetId>,
    ) -> Vec<PointerEvent> {
        let (x, y) = input.mouse_pos();

        let top_popup = popups.iter().rev().copied().find(|&p| under(tree, p, x, y));
        let now = top_popup.or_else(|| {
            icons
                .into_iter()
                .filter(|&icon| under(tree, icon, x, y))
                .filter_map(|icon| tree.get(icon).map(|s| (icon, s.rect.area())))
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                .map(|(icon, _)| icon)
        });

        let mut events = Vec::with_capacity(2);
        if now != self.hovered {
            if let Some(prev) = self.hovered {
                if let Some(state) = tree.get_mut(prev) {
                    state.flags.clear(WidgetFlags::HOVERED);
                    events.push(PointerEvent::Exit(prev));
                }
            }
            if let Some(next) = now {
                if let Some(state) = tree.get_mut(next) {
                    state.flags.set(WidgetFlags::HOVERED);
                }
                events.push(PointerEvent::Enter(next));
            }
            self.hovered = now;
        }

        if input.mouse_clicked(MouseButton::Left) {
            if let Some(popup) = top_popup {
                let clicked = targets
                    .into_iter()
                    .find(|&t| tree.is_descendant_of(t, popup) && under(tree, t, x, y));
                if let Some(target) = clicked {
                    events.push(PointerEvent::Click(target));
                }
            }
        }

        events
    }
}

fn under(tree: &WidgetTree, id: WidgetId, x: f32, y: f32) -> bool {
    tree.get(id)
        .is_some_and(|s| s.accepts_pointer() && s.rect.contains(x, y))
}
