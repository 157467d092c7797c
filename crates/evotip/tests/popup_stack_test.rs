//! Integration tests for the drill-down popup stack.
//!
//! Every scenario drives a real `TooltipSession` against a mirrored widget
//! tree and a TOML catalog, through the same entry points a host uses.

use std::collections::HashSet;

use evotip::{Focus, HostCtx, PopupSubject, Sighting, TooltipSession};
use evotip_catalog::{Catalog, ItemRef};
use evotip_ui::{InputState, Rect, WidgetId, WidgetState, WidgetTree};

const CATALOG: &str = r#"
[[weapon]]
key = 42
name = "Whip"
description = "Attacks horizontally."
icon = "weapon_42"

[[weapon]]
key = 1
name = "Wand"
description = "Fires at the nearest enemy."
icon = "weapon_1"

[[weapon]]
key = 3
name = "Holy Wand"
description = "Fires with no delay."
icon = "weapon_3"

[[accessory]]
key = 2
name = "Empty Tome"
description = "Reduces cooldowns."
icon = "accessory_2"

[[recipe]]
ingredients = [{ kind = "weapon", key = 1 }, { kind = "accessory", key = 2 }]
result = { kind = "weapon", key = 3 }
"#;

const WHIP: ItemRef = ItemRef::weapon(42);
const WAND: ItemRef = ItemRef::weapon(1);
const HOLY_WAND: ItemRef = ItemRef::weapon(3);
const TOME: ItemRef = ItemRef::accessory(2);

const VIEW: WidgetId = WidgetId(1);
const ICON_A: WidgetId = WidgetId(10);
const ICON_B: WidgetId = WidgetId(11);

const FRAME: f32 = 1.0 / 64.0;

struct Fixture {
    tree: WidgetTree,
    catalog: Catalog,
    session: TooltipSession,
}

impl Fixture {
    fn new() -> Self {
        let mut tree = WidgetTree::new();
        tree.add_root(
            WidgetState::new(VIEW)
                .with_name("PauseView")
                .with_rect(Rect::new(0.0, 0.0, 1280.0, 720.0)),
        );
        tree.add_child(VIEW, WidgetState::new(ICON_A).with_rect(Rect::new(100.0, 100.0, 40.0, 40.0)));
        tree.add_child(VIEW, WidgetState::new(ICON_B).with_rect(Rect::new(900.0, 500.0, 40.0, 40.0)));

        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        catalog.set_paused(true);

        Self {
            tree,
            catalog,
            session: TooltipSession::default(),
        }
    }

    fn with<R>(&mut self, f: impl FnOnce(&mut TooltipSession, &mut HostCtx<'_>) -> R) -> R {
        let mut ctx = HostCtx::new(&mut self.tree, &self.catalog);
        f(&mut self.session, &mut ctx)
    }

    fn open(&mut self, anchor: WidgetId, item: ItemRef) {
        self.with(|s, ctx| s.open(ctx, anchor, item));
    }

    fn click(&mut self, widget: WidgetId) {
        self.with(|s, ctx| s.click(ctx, widget));
    }

    fn enter(&mut self, widget: WidgetId) {
        self.with(|s, ctx| s.pointer_enter(ctx, widget));
    }

    fn exit(&mut self, widget: WidgetId) {
        self.session.pointer_exit(widget);
    }

    fn update_at(&mut self, x: f32, y: f32, dt: f32) {
        let mut input = InputState::new();
        input.set_mouse_pos(x, y);
        self.with(|s, ctx| s.update(ctx, &input, dt));
    }

    /// Frames with the pointer parked off-screen.
    fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.update_at(-500.0, -500.0, FRAME);
        }
    }

    fn popup(&self, index: usize) -> WidgetId {
        self.session.stack().entries()[index].widget()
    }

    fn anchors(&self) -> Vec<WidgetId> {
        self.session.stack().entries().iter().map(|e| e.anchor).collect()
    }

    /// Clickable icon for `item` inside the popup at `index`.
    fn target(&self, index: usize, item: ItemRef) -> WidgetId {
        self.session.stack().entries()[index]
            .view
            .targets()
            .iter()
            .find(|(_, subject)| *subject == PopupSubject::Item(item))
            .map(|(widget, _)| *widget)
            .unwrap()
    }

    /// Opens Wand from ICON_A, Tome from inside it, Holy Wand from inside that.
    fn open_chain(&mut self) {
        self.open(ICON_A, WAND);
        let tome = self.target(0, TOME);
        self.click(tome);
        let holy_wand = self.target(1, HOLY_WAND);
        self.click(holy_wand);
        assert_eq!(self.session.stack().len(), 3);
    }
}

#[test]
fn test_at_most_one_popup_per_anchor() {
    let mut fx = Fixture::new();

    fx.open(ICON_A, WAND);
    fx.open(ICON_A, WAND);
    let tome = fx.target(0, TOME);
    fx.click(tome);
    fx.click(tome);
    fx.open(ICON_A, WAND);

    let anchors = fx.anchors();
    let unique: HashSet<_> = anchors.iter().collect();
    assert_eq!(anchors.len(), unique.len());
    assert_eq!(anchors, vec![ICON_A, tome]);
}

#[test]
fn test_chain_invariant() {
    let mut fx = Fixture::new();
    fx.open_chain();

    let entries = fx.session.stack().entries();
    for i in 1..entries.len() {
        assert!(fx.tree.is_descendant_of(entries[i].anchor, entries[i - 1].widget()));
        assert_eq!(entries[i].depth, i);
    }
}

#[test]
fn test_root_open_clears_unrelated_stack() {
    let mut fx = Fixture::new();
    fx.open_chain();
    let old_popups: Vec<_> = (0..3).map(|i| fx.popup(i)).collect();

    fx.open(ICON_B, WHIP);

    assert_eq!(fx.anchors(), vec![ICON_B]);
    for popup in old_popups {
        assert!(!fx.tree.contains(popup));
    }
}

#[test]
fn test_drill_down_replaces_sibling() {
    let mut fx = Fixture::new();
    fx.open(ICON_A, WAND);
    let x = fx.target(0, TOME);
    let y = fx.target(0, HOLY_WAND);

    fx.click(x);
    let x_popup = fx.popup(1);
    fx.click(y);

    assert_eq!(fx.anchors(), vec![ICON_A, y]);
    assert!(!fx.tree.contains(x_popup));
}

#[test]
fn test_icon_exit_cancelled_by_entering_popup() {
    let mut fx = Fixture::new();
    fx.with(|s, ctx| s.register_icon(ctx, ICON_A, WAND));

    fx.enter(ICON_A);
    assert_eq!(fx.session.stack().len(), 1);

    fx.exit(ICON_A);
    let popup = fx.popup(0);
    fx.enter(popup);
    fx.tick(20);

    assert_eq!(fx.session.stack().len(), 1);
    assert_eq!(fx.session.focus(), Focus::OnPopup(0));
}

#[test]
fn test_popup_exit_cancelled_by_reentry() {
    let mut fx = Fixture::new();
    fx.open(ICON_A, WAND);
    let tome = fx.target(0, TOME);
    fx.click(tome);

    let child = fx.popup(1);
    fx.enter(child);
    fx.exit(child);
    fx.tick(3);
    fx.enter(child);
    fx.tick(20);

    assert_eq!(fx.session.stack().len(), 2);
}

#[test]
fn test_icon_exit_collapses_after_delay() {
    let mut fx = Fixture::new();
    fx.with(|s, ctx| s.register_icon(ctx, ICON_A, WAND));
    fx.enter(ICON_A);
    fx.exit(ICON_A);

    let delay = fx.session.config().exit_delay_frames;
    fx.tick(delay - 1);
    assert_eq!(fx.session.stack().len(), 1);
    fx.tick(1);
    assert!(fx.session.stack().is_empty());
}

#[test]
fn test_exit_check_stale_after_new_open() {
    let mut fx = Fixture::new();
    fx.with(|s, ctx| {
        s.register_icon(ctx, ICON_A, WAND);
        s.register_icon(ctx, ICON_B, WHIP);
    });

    // Straight from one icon to another: the second popup must survive
    fx.enter(ICON_A);
    fx.exit(ICON_A);
    fx.enter(ICON_B);
    fx.tick(20);

    assert_eq!(fx.anchors(), vec![ICON_B]);
}

#[test]
fn test_skip_level_collapse() {
    let mut fx = Fixture::new();
    fx.open_chain();
    let (a, c) = (fx.popup(0), fx.popup(2));

    fx.enter(c);
    fx.exit(c);
    fx.enter(a);
    fx.tick(fx.session.config().exit_delay_frames);

    assert_eq!(fx.anchors(), vec![ICON_A]);
    assert_eq!(fx.session.focus(), Focus::OnPopup(0));
}

#[test]
fn test_exit_to_nowhere_closes_chain() {
    let mut fx = Fixture::new();
    fx.open_chain();
    let b = fx.popup(1);

    fx.enter(b);
    fx.exit(b);
    fx.tick(fx.session.config().exit_delay_frames);

    assert!(fx.session.stack().is_empty());
    assert_eq!(fx.tree.children(VIEW), &[ICON_A, ICON_B]);
}

#[test]
fn test_evolution_rows_deduplicated() {
    let source = r#"
[[weapon]]
key = 1
name = "X"
icon = "x"

[[weapon]]
key = 3
name = "Z"
icon = "z"

[[accessory]]
key = 2
name = "Y"
icon = "y"

[[accessory]]
key = 4
name = "W"
icon = "w"

[[recipe]]
ingredients = [{ kind = "weapon", key = 1 }, { kind = "accessory", key = 2 }, { kind = "accessory", key = 4 }]
result = { kind = "weapon", key = 3 }

[[recipe]]
ingredients = [{ kind = "weapon", key = 1 }, { kind = "accessory", key = 4 }, { kind = "accessory", key = 2 }]
result = { kind = "weapon", key = 3 }
"#;
    let mut fx = Fixture::new();
    fx.catalog = Catalog::from_toml_str(source).unwrap();
    fx.catalog.set_paused(true);

    fx.open(ICON_A, ItemRef::accessory(2));

    let content = fx.session.stack().entries()[0].view.content();
    assert_eq!(content.evolutions.len(), 1);
    assert_eq!(content.evolutions[0].result, ItemRef::weapon(3));
}

#[test]
fn test_unpause_tears_everything_down() {
    let mut fx = Fixture::new();
    let feed = fx.session.sighting_sender();
    assert!(feed.send(Sighting::new(ICON_A, "weapon_1")));
    assert!(feed.send(Sighting::new(ICON_B, "weapon_42")));

    // Let the scanner run
    fx.update_at(-500.0, -500.0, 1.0);
    assert_eq!(fx.session.scanner().len(), 2);

    fx.open_chain();
    let popups: Vec<_> = (0..3).map(|i| fx.popup(i)).collect();
    fx.exit(popups[2]);

    fx.catalog.set_paused(false);
    fx.tick(1);

    assert!(fx.session.stack().is_empty());
    assert!(fx.session.scanner().is_empty());
    assert!(fx.session.hover().is_empty());
    assert_eq!(fx.session.pending_checks(), 0);
    for popup in popups {
        assert!(!fx.tree.contains(popup));
    }
}

#[test]
fn test_whip_scenario() {
    let mut fx = Fixture::new();
    fx.session.sighting_sender().send(Sighting::new(ICON_A, "weapon_42"));
    fx.update_at(-500.0, -500.0, 1.0);
    assert_eq!(fx.session.hover().subject(ICON_A), Some(PopupSubject::Item(WHIP)));

    fx.enter(ICON_A);

    let config = fx.session.config().clone();
    let content = fx.session.stack().entries()[0].view.content();
    assert!(content.evolutions.is_empty());
    assert!(content.modifiers.is_empty());
    assert!(content.sections.evolution.abs() < f32::EPSILON);
    assert!(content.sections.modifiers.abs() < f32::EPSILON);

    let description = config.line_height; // one wrapped line
    let expected = config.header_height + description + 2.0 * config.padding;
    assert!((content.height - expected).abs() < f32::EPSILON);
}

#[test]
fn test_pointer_routing_end_to_end() {
    let mut fx = Fixture::new();
    fx.with(|s, ctx| s.register_icon(ctx, ICON_A, WAND));

    // Onto the icon: popup opens under the pointer
    fx.update_at(120.0, 120.0, FRAME);
    assert_eq!(fx.session.stack().len(), 1);

    // Resting inside the popup keeps it open
    for _ in 0..20 {
        fx.update_at(125.0, 125.0, FRAME);
    }
    assert_eq!(fx.session.focus(), Focus::OnPopup(0));
    assert_eq!(fx.session.stack().len(), 1);

    // Away from everything: closes after the exit delay
    fx.update_at(1200.0, 700.0, FRAME);
    assert_eq!(fx.session.stack().len(), 1);
    fx.tick(fx.session.config().exit_delay_frames);
    assert!(fx.session.stack().is_empty());
}
