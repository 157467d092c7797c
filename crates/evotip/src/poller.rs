//! # Collection-Screen Poller
//!
//! Outside the paused context icons are not wired for events. Instead the
//! pointer is hit-tested against a registry of icon rects every frame, and
//! a hit must dwell before its popup replaces the one on screen.
//!
//! Overlapping icons: the smallest rect wins, ties go to the icon
//! registered first. Leaving every icon keeps the current popup up.

use evotip_ui::{WidgetId, WidgetTree};

use crate::subject::PopupSubject;

/// A registered collection icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionIcon {
    /// Icon widget.
    pub widget: WidgetId,
    /// What it shows.
    pub subject: PopupSubject,
}

/// A hit waiting out the dwell delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingHover {
    /// Icon under the pointer.
    pub candidate: CollectionIcon,
    /// When the pointer arrived, in seconds.
    pub since: f32,
}

/// Polling hover detector with a single pending slot.
#[derive(Debug)]
pub struct CollectionPoller {
    dwell_delay: f32,
    registry: Vec<CollectionIcon>,
    pending: Option<PendingHover>,
    shown: Option<WidgetId>,
}

impl CollectionPoller {
    /// Creates a poller requiring `dwell_delay` seconds of continuous hover.
    #[must_use]
    pub fn new(dwell_delay: f32) -> Self {
        Self {
            dwell_delay,
            registry: Vec::with_capacity(64),
            pending: None,
            shown: None,
        }
    }

    /// Registers an icon. Re-registering a widget updates its subject in place.
    pub fn register(&mut self, widget: WidgetId, subject: PopupSubject) {
        if let Some(icon) = self.registry.iter_mut().find(|icon| icon.widget == widget) {
            icon.subject = subject;
        } else {
            self.registry.push(CollectionIcon { widget, subject });
        }
    }

    /// Returns true if `widget` is registered.
    #[must_use]
    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.registry.iter().any(|icon| icon.widget == widget)
    }

    /// Number of registered icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no icon is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The pending hover, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingHover> {
        self.pending
    }

    /// Widget whose popup is on screen.
    #[must_use]
    pub fn shown(&self) -> Option<WidgetId> {
        self.shown
    }

    /// Records that `widget`'s popup is now on screen.
    pub fn mark_shown(&mut self, widget: Option<WidgetId>) {
        self.shown = widget;
        self.pending = None;
    }

    /// Forgets every icon and any pending hover.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.pending = None;
        self.shown = None;
    }

    /// Drops the pending hover without touching the registry.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Registered icon under `(x, y)`.
    #[must_use]
    pub fn hit(&self, tree: &WidgetTree, x: f32, y: f32) -> Option<CollectionIcon> {
        let mut best: Option<(CollectionIcon, f32)> = None;
        for icon in &self.registry {
            let Some(state) = tree.get(icon.widget) else {
                continue;
            };
            if !state.accepts_pointer() || !state.rect.contains(x, y) {
                continue;
            }
            let area = state.rect.area();
            if best.is_none_or(|(_, best_area)| area < best_area) {
                best = Some((*icon, area));
            }
        }
        best.map(|(icon, _)| icon)
    }

    /// Polls the pointer at time `now` (seconds).
    ///
    /// Returns the icon whose popup should replace the current one once it
    /// has been hovered for the dwell delay. The hit is not recorded as shown:
    /// the caller calls [`CollectionPoller::mark_shown`] once its popup is
    /// actually up, so a failed open is dwelt on and retried.
    pub fn poll(&mut self, tree: &WidgetTree, x: f32, y: f32, now: f32) -> Option<CollectionIcon> {
        self.registry.retain(|icon| tree.contains(icon.widget));

        let Some(hit) = self.hit(tree, x, y) else {
            self.pending = None;
            return None;
        };

        if self.shown == Some(hit.widget) {
            self.pending = None;
            return None;
        }

        match self.pending {
            Some(pending) if pending.candidate.widget == hit.widget => {
                if now - pending.since >= self.dwell_delay {
                    tracing::trace!(widget = %hit.widget, subject = %hit.subject, "dwell elapsed");
                    self.pending = None;
                    Some(hit)
                } else {
                    None
                }
            }
            _ => {
                self.pending = Some(PendingHover { candidate: hit, since: now });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evotip_catalog::ItemRef;
    use evotip_ui::{Rect, WidgetState};

    const P: PopupSubject = PopupSubject::Item(ItemRef::weapon(1));
    const Q: PopupSubject = PopupSubject::Item(ItemRef::weapon(2));

    fn tree() -> WidgetTree {
        let mut tree = WidgetTree::new();
        let view = WidgetId(1);
        tree.add_root(WidgetState::new(view).with_name("CollectionView"));
        tree.add_child(view, WidgetState::new(WidgetId(10)).with_rect(Rect::new(0.0, 0.0, 40.0, 40.0)));
        tree.add_child(view, WidgetState::new(WidgetId(11)).with_rect(Rect::new(100.0, 0.0, 40.0, 40.0)));
        tree.add_child(view, WidgetState::new(WidgetId(12)).with_rect(Rect::new(0.0, 0.0, 200.0, 200.0)));
        tree
    }

    #[test]
    fn test_smallest_rect_wins() {
        let tree = tree();
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(12), Q);
        poller.register(WidgetId(10), P);

        assert_eq!(poller.hit(&tree, 10.0, 10.0).map(|i| i.widget), Some(WidgetId(10)));
        assert_eq!(poller.hit(&tree, 150.0, 150.0).map(|i| i.widget), Some(WidgetId(12)));
    }

    #[test]
    fn test_equal_area_goes_to_first_registered() {
        let mut tree = tree();
        tree.add_child(WidgetId(1), WidgetState::new(WidgetId(13)).with_rect(Rect::new(0.0, 0.0, 40.0, 40.0)));
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(13), Q);
        poller.register(WidgetId(10), P);

        assert_eq!(poller.hit(&tree, 5.0, 5.0).map(|i| i.widget), Some(WidgetId(13)));
    }

    #[test]
    fn test_dwell_before_show() {
        let tree = tree();
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(10), P);

        assert!(poller.poll(&tree, 10.0, 10.0, 0.0).is_none());
        assert!(poller.poll(&tree, 10.0, 10.0, 0.5).is_none());
        let shown = poller.poll(&tree, 10.0, 10.0, 1.0).unwrap();
        assert_eq!(shown.subject, P);
        poller.mark_shown(Some(shown.widget));
        assert_eq!(poller.shown(), Some(WidgetId(10)));

        // Staying put does not fire again
        assert!(poller.poll(&tree, 10.0, 10.0, 5.0).is_none());
    }

    #[test]
    fn test_unconfirmed_hit_dwells_again() {
        let tree = tree();
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(10), P);

        poller.poll(&tree, 10.0, 10.0, 0.0);
        assert!(poller.poll(&tree, 10.0, 10.0, 1.0).is_some());
        assert_eq!(poller.shown(), None);
        assert!(poller.pending().is_none());

        // Popup never came up: the icon restarts its dwell
        assert!(poller.poll(&tree, 10.0, 10.0, 1.5).is_none());
        assert!(poller.poll(&tree, 10.0, 10.0, 2.0).is_none());
        assert!(poller.poll(&tree, 10.0, 10.0, 2.5).is_some());
    }

    #[test]
    fn test_moving_resets_pending() {
        let tree = tree();
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(10), P);
        poller.register(WidgetId(11), Q);

        assert!(poller.poll(&tree, 10.0, 10.0, 0.0).is_none());
        assert!(poller.poll(&tree, 110.0, 10.0, 0.9).is_none());
        assert!(poller.poll(&tree, 110.0, 10.0, 1.5).is_none());
        assert_eq!(poller.poll(&tree, 110.0, 10.0, 2.0).map(|i| i.subject), Some(Q));
    }

    #[test]
    fn test_leaving_icons_is_sticky() {
        let tree = tree();
        let mut poller = CollectionPoller::new(0.0);
        poller.register(WidgetId(10), P);

        poller.poll(&tree, 10.0, 10.0, 0.0);
        let shown = poller.poll(&tree, 10.0, 10.0, 0.1);
        assert!(shown.is_some());
        poller.mark_shown(shown.map(|icon| icon.widget));
        assert!(poller.poll(&tree, 500.0, 500.0, 0.2).is_none());
        assert_eq!(poller.shown(), Some(WidgetId(10)));
    }

    #[test]
    fn test_re_register_keeps_order() {
        let mut poller = CollectionPoller::new(1.0);
        poller.register(WidgetId(10), P);
        poller.register(WidgetId(11), P);
        poller.register(WidgetId(10), Q);

        assert_eq!(poller.len(), 2);
        assert_eq!(poller.registry[0], CollectionIcon { widget: WidgetId(10), subject: Q });
    }
}
