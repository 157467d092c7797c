//! Hover wiring for in-context icons.
//!
//! Attaching marks a widget as a hover trigger for a popup subject. Enter
//! and exit events for attached widgets are turned into stack opens and
//! debounced exit checks by the session.

use std::collections::HashMap;

use evotip_ui::{WidgetId, WidgetTree};

use crate::subject::PopupSubject;

/// Widgets wired for hover.
#[derive(Debug, Default)]
pub struct HoverTracker {
    attached: HashMap<WidgetId, PopupSubject>,
}

impl HoverTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: HashMap::with_capacity(64),
        }
    }

    /// Wires `widget` to open `subject`.
    ///
    /// Returns false, leaving the existing wiring in place, if the widget
    /// is already attached.
    pub fn attach(&mut self, widget: WidgetId, subject: PopupSubject) -> bool {
        if self.attached.contains_key(&widget) {
            return false;
        }
        self.attached.insert(widget, subject);
        true
    }

    /// Removes the wiring for `widget`.
    pub fn detach(&mut self, widget: WidgetId) -> Option<PopupSubject> {
        self.attached.remove(&widget)
    }

    /// Subject `widget` opens, if attached.
    #[must_use]
    pub fn subject(&self, widget: WidgetId) -> Option<PopupSubject> {
        self.attached.get(&widget).copied()
    }

    /// Returns true if `widget` is attached.
    #[must_use]
    pub fn is_attached(&self, widget: WidgetId) -> bool {
        self.attached.contains_key(&widget)
    }

    /// Attached widgets.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.attached.keys().copied()
    }

    /// Number of attached widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Returns true if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Drops wiring for widgets the host destroyed.
    pub fn retain_alive(&mut self, tree: &WidgetTree) {
        self.attached.retain(|&widget, _| tree.contains(widget));
    }

    /// Drops all wiring.
    pub fn clear(&mut self) {
        self.attached.clear();
    }
}
