//! # Icon Scanner
//!
//! Turns discovery sightings into hover-wired icons. Runs on a fixed
//! cadence while the host is paused:
//!
//! 1. Untrack icons whose widget the host destroyed
//! 2. Drain the discovery feed
//! 3. Resolve each new (or re-skinned) widget's sprite to an item or arcana
//! 4. Attach hover wiring for the resolved identity
//!
//! Sprites the provider does not recognise are never tracked; if the
//! discovery layer sees them again they are simply retried.

use std::collections::HashMap;

use evotip_catalog::DataProvider;
use evotip_ui::{WidgetId, WidgetTree};

use crate::feed::{sighting_channel, SightingReceiver, SightingSender};
use crate::hover::HoverTracker;
use crate::subject::PopupSubject;

/// An identified icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIcon {
    /// Icon widget.
    pub widget: WidgetId,
    /// Resolved identity.
    pub subject: PopupSubject,
    /// Sprite the identity was resolved from.
    pub visual_key: String,
    /// Whether this scanner wired the hover handlers.
    pub handlers_attached: bool,
}

/// Resolves a sprite name, trying items before arcana.
#[must_use]
pub fn resolve(provider: &dyn DataProvider, visual_key: &str) -> Option<PopupSubject> {
    provider
        .lookup(visual_key)
        .map(PopupSubject::Item)
        .or_else(|| provider.lookup_modifier(visual_key).map(PopupSubject::Modifier))
}

/// Owns the tracked-icon registry and the receiving end of the feed.
#[derive(Debug)]
pub struct IconScanner {
    tracked: HashMap<WidgetId, TrackedIcon>,
    sender: SightingSender,
    feed: SightingReceiver,
    interval: f32,
    elapsed: f32,
}

impl IconScanner {
    /// Creates a scanner running every `interval` seconds.
    #[must_use]
    pub fn new(interval: f32, feed_capacity: usize) -> Self {
        let (sender, feed) = sighting_channel(feed_capacity);
        Self {
            tracked: HashMap::with_capacity(64),
            sender,
            feed,
            interval,
            elapsed: 0.0,
        }
    }

    /// A handle for the discovery layer.
    #[must_use]
    pub fn sender(&self) -> SightingSender {
        self.sender.clone()
    }

    /// Advances the cadence timer. Returns true when a scan is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Runs one scan. Returns the number of newly tracked icons.
    pub fn scan(&mut self, tree: &WidgetTree, provider: &dyn DataProvider, hover: &mut HoverTracker) -> usize {
        let before = self.tracked.len();
        self.tracked.retain(|&widget, icon| {
            let alive = tree.contains(widget);
            if !alive && icon.handlers_attached {
                hover.detach(widget);
            }
            alive
        });
        if self.tracked.len() != before {
            tracing::trace!(dropped = before - self.tracked.len(), "untracked destroyed icons");
        }

        let mut added = 0;
        for sighting in self.feed.drain() {
            let widget = sighting.widget;
            if !tree.contains(widget) {
                continue;
            }

            if let Some(icon) = self.tracked.get(&widget) {
                if icon.visual_key == sighting.visual_key {
                    continue;
                }
                // New sprite on an old widget: a different icon now
                self.untrack(widget, hover);
            }

            let Some(subject) = resolve(provider, &sighting.visual_key) else {
                tracing::debug!(%widget, key = %sighting.visual_key, "unrecognised sprite");
                continue;
            };

            let handlers_attached = hover.attach(widget, subject);
            self.tracked.insert(
                widget,
                TrackedIcon {
                    widget,
                    subject,
                    visual_key: sighting.visual_key,
                    handlers_attached,
                },
            );
            added += 1;
        }

        if added > 0 {
            tracing::trace!(added, tracked = self.tracked.len(), "icon scan");
        }
        added
    }

    fn untrack(&mut self, widget: WidgetId, hover: &mut HoverTracker) {
        if let Some(icon) = self.tracked.remove(&widget) {
            if icon.handlers_attached {
                hover.detach(widget);
            }
        }
    }

    /// Tracked icon for `widget`.
    #[must_use]
    pub fn get(&self, widget: WidgetId) -> Option<&TrackedIcon> {
        self.tracked.get(&widget)
    }

    /// Number of tracked icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Forgets every tracked icon and any queued sightings.
    pub fn clear(&mut self) {
        self.tracked.clear();
        self.feed.discard();
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Sighting;
    use evotip_catalog::{Catalog, ItemRef, ModifierRef};
    use evotip_ui::WidgetState;

    const CATALOG: &str = r#"
[[weapon]]
key = 42
name = "Whip"
icon = "weapon_42"

[[weapon]]
key = 7
name = "Wand"
icon = "weapon_7"

[[arcana]]
key = 1
name = "Game Killer"
icon = "arcana_1"
"#;

    fn setup() -> (WidgetTree, Catalog, IconScanner, HoverTracker) {
        let mut tree = WidgetTree::new();
        tree.add_root(WidgetState::new(WidgetId(1)).with_name("PauseView"));
        for id in 10..14 {
            tree.add_child(WidgetId(1), WidgetState::new(WidgetId(id)));
        }
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        (tree, catalog, IconScanner::new(0.5, 64), HoverTracker::new())
    }

    #[test]
    fn test_cadence() {
        let mut scanner = IconScanner::new(0.5, 8);
        assert!(!scanner.tick(0.25));
        assert!(scanner.tick(0.25));
        assert!(!scanner.tick(0.1));
    }

    #[test]
    fn test_resolves_items_and_arcana() {
        let (tree, catalog, mut scanner, mut hover) = setup();
        let sender = scanner.sender();
        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        sender.send(Sighting::new(WidgetId(11), "arcana_1"));
        sender.send(Sighting::new(WidgetId(12), "background_tile"));

        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 2);
        assert_eq!(hover.subject(WidgetId(10)), Some(PopupSubject::Item(ItemRef::weapon(42))));
        assert_eq!(hover.subject(WidgetId(11)), Some(PopupSubject::Modifier(ModifierRef(1))));
        assert!(scanner.get(WidgetId(12)).is_none());
    }

    #[test]
    fn test_unresolved_retried_when_seen_again() {
        let (tree, catalog, mut scanner, mut hover) = setup();
        let sender = scanner.sender();
        sender.send(Sighting::new(WidgetId(10), "loading"));
        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 0);

        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 1);
    }

    #[test]
    fn test_same_sprite_is_not_reattached() {
        let (tree, catalog, mut scanner, mut hover) = setup();
        let sender = scanner.sender();
        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        scanner.scan(&tree, &catalog, &mut hover);
        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 0);
        assert_eq!(scanner.len(), 1);
    }

    #[test]
    fn test_changed_sprite_is_a_new_icon() {
        let (tree, catalog, mut scanner, mut hover) = setup();
        let sender = scanner.sender();
        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        scanner.scan(&tree, &catalog, &mut hover);

        sender.send(Sighting::new(WidgetId(10), "weapon_7"));
        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 1);
        assert_eq!(hover.subject(WidgetId(10)), Some(PopupSubject::Item(ItemRef::weapon(7))));
    }

    #[test]
    fn test_destroyed_widgets_untracked() {
        let (mut tree, catalog, mut scanner, mut hover) = setup();
        let sender = scanner.sender();
        sender.send(Sighting::new(WidgetId(10), "weapon_42"));
        scanner.scan(&tree, &catalog, &mut hover);

        tree.remove(WidgetId(10));
        scanner.scan(&tree, &catalog, &mut hover);
        assert!(scanner.is_empty());
        assert!(!hover.is_attached(WidgetId(10)));
    }

    #[test]
    fn test_sighting_of_dead_widget_ignored() {
        let (tree, catalog, mut scanner, mut hover) = setup();
        scanner.sender().send(Sighting::new(WidgetId(99), "weapon_42"));
        assert_eq!(scanner.scan(&tree, &catalog, &mut hover), 0);
    }
}
