//! # Tooltip Session
//!
//! One session per host attachment. It owns every piece of overlay state
//! and is driven from the host's frame callback:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       update(ctx, input, dt)                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  1. Pause transition      (reset / clear collection icons)   │
//! │  2. Prune dead widgets    (host may destroy views any time)  │
//! │  3. Escape                (close everything)                 │
//! │  4. Pointer routing       (enter / exit / click)             │
//! │  5. Deferred exit checks  (stale-checked, never cancelled)   │
//! │  6. Paused:   icon scan on cadence                           │
//! │     Unpaused: collection poll with dwell                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error to the host. Internal failures are
//! logged at debug level and the popup simply does not appear.

use std::collections::HashMap;

use evotip_catalog::{DataProvider, ItemRef, ModifierRef};
use evotip_ui::{InputState, Key, Rect, Theme, UIRenderer, WidgetId, WidgetTree};

use crate::config::TooltipConfig;
use crate::content::PopupBuilder;
use crate::error::{OverlayError, OverlayResult};
use crate::feed::SightingSender;
use crate::hover::HoverTracker;
use crate::placement::place_popup;
use crate::pointer::{PointerEvent, PointerRouter};
use crate::poller::CollectionPoller;
use crate::scanner::IconScanner;
use crate::schedule::{DeferredCheck, FrameScheduler};
use crate::stack::{decide, Collapse, Focus, PopupStack};
use crate::subject::PopupSubject;
use crate::view::PopupView;

/// Z-index of the bottom popup; deeper popups stack above it.
pub const POPUP_BASE_Z: i32 = 1000;

/// What the host lends the session for one call.
pub struct HostCtx<'a> {
    /// Mirror of the host widget hierarchy.
    pub tree: &'a mut WidgetTree,
    /// Host game data.
    pub provider: &'a dyn DataProvider,
}

impl<'a> HostCtx<'a> {
    /// Bundles the widget mirror and data provider.
    pub fn new(tree: &'a mut WidgetTree, provider: &'a dyn DataProvider) -> Self {
        Self { tree, provider }
    }
}

/// All overlay state for one host attachment.
pub struct TooltipSession {
    config: TooltipConfig,
    theme: Theme,
    stack: PopupStack,
    hover: HoverTracker,
    clicks: HashMap<WidgetId, PopupSubject>,
    poller: CollectionPoller,
    collection: Option<PopupView>,
    scheduler: FrameScheduler<DeferredCheck>,
    scanner: IconScanner,
    router: PointerRouter,
    paused: Option<bool>,
    clock: f32,
}

impl TooltipSession {
    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: TooltipConfig) -> OverlayResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TooltipConfig) -> Self {
        Self {
            theme: Theme::default(),
            stack: PopupStack::new(),
            hover: HoverTracker::new(),
            clicks: HashMap::with_capacity(32),
            poller: CollectionPoller::new(config.dwell_delay),
            collection: None,
            scheduler: FrameScheduler::new(),
            scanner: IconScanner::new(config.scan_interval, config.feed_capacity),
            router: PointerRouter::new(),
            paused: None,
            clock: 0.0,
            config,
        }
    }

    /// Replaces the popup theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Handle for the discovery layer to report `(widget, sprite)` sightings.
    #[must_use]
    pub fn sighting_sender(&self) -> SightingSender {
        self.scanner.sender()
    }

    /// Registers an item icon.
    ///
    /// While paused the icon is wired for hover; otherwise it joins the
    /// collection-screen registry.
    pub fn register_icon(&mut self, ctx: &mut HostCtx<'_>, widget: WidgetId, item: ItemRef) {
        self.register(ctx, widget, PopupSubject::Item(item));
    }

    /// Registers an arcana icon. Same routing as [`register_icon`](Self::register_icon).
    pub fn register_modifier_icon(&mut self, ctx: &mut HostCtx<'_>, widget: WidgetId, modifier: ModifierRef) {
        self.register(ctx, widget, PopupSubject::Modifier(modifier));
    }

    fn register(&mut self, ctx: &mut HostCtx<'_>, widget: WidgetId, subject: PopupSubject) {
        if !ctx.tree.contains(widget) {
            tracing::debug!(%widget, %subject, "icon registered before its widget was mirrored");
            return;
        }
        if ctx.provider.is_paused() {
            self.hover.attach(widget, subject);
        } else {
            self.poller.register(widget, subject);
        }
    }

    // =========================================================================
    // Opening
    // =========================================================================

    /// Opens the popup for `subject` anchored on `anchor`.
    ///
    /// Paused: drill-down stack. Otherwise: the single collection popup.
    /// Failures leave the screen unchanged.
    pub fn open(&mut self, ctx: &mut HostCtx<'_>, anchor: WidgetId, subject: impl Into<PopupSubject>) {
        let subject = subject.into();
        let result = if ctx.provider.is_paused() {
            self.open_in_stack(ctx, anchor, subject)
        } else {
            self.open_collection(ctx, anchor, subject)
        };
        if let Err(err) = result {
            tracing::debug!(%anchor, %subject, error = %err, "popup not opened");
        }
    }

    fn open_in_stack(&mut self, ctx: &mut HostCtx<'_>, anchor: WidgetId, subject: PopupSubject) -> OverlayResult<()> {
        if self.stack.contains_anchor(anchor) {
            return Ok(());
        }
        if !ctx.tree.contains(anchor) {
            return Err(OverlayError::AnchorMissing(anchor));
        }

        match self.stack.parent_of(ctx.tree, anchor) {
            Some(parent) => self.stack.collapse_above(ctx.tree, parent),
            None if !self.stack.is_empty() => self.stack.collapse_all(ctx.tree),
            None => {}
        }
        self.prune_targets(ctx.tree);

        let viewport = ctx
            .tree
            .find_ancestor_named(anchor, &self.config.viewport_names)
            .ok_or(OverlayError::ViewportNotFound(anchor))?;
        let view = self.materialize(ctx, anchor, viewport, subject)?;

        self.clicks.extend(view.targets().iter().copied());
        let index = self.stack.push(anchor, view);
        tracing::trace!(%anchor, %subject, index, "popup opened");
        Ok(())
    }

    fn open_collection(&mut self, ctx: &mut HostCtx<'_>, anchor: WidgetId, subject: PopupSubject) -> OverlayResult<()> {
        if !self.poller.is_registered(anchor) && !self.clicks.contains_key(&anchor) {
            tracing::trace!(%anchor, "not a collection icon");
            return Ok(());
        }

        let viewport = ctx
            .tree
            .find_ancestor_named(anchor, std::slice::from_ref(&self.config.collection_viewport_name))
            .or_else(|| ctx.tree.find_ancestor_named(anchor, &self.config.viewport_names))
            .ok_or(OverlayError::ViewportNotFound(anchor))?;

        // Build before tearing down: the anchor may live in the old popup
        let content = PopupBuilder::new(&self.config).build(ctx.provider, subject)?;
        let bounds = self.place(ctx.tree, anchor, viewport, content.size())?;

        if let Some(old) = self.collection.take() {
            old.destroy(ctx.tree);
        }
        self.prune_targets(ctx.tree);

        let view = PopupView::materialize(ctx.tree, viewport, content, bounds)?;
        self.clicks.extend(view.targets().iter().copied());
        self.poller.mark_shown(Some(anchor));
        self.collection = Some(view);
        tracing::trace!(%anchor, %subject, "collection popup shown");
        Ok(())
    }

    fn materialize(
        &self,
        ctx: &mut HostCtx<'_>,
        anchor: WidgetId,
        viewport: WidgetId,
        subject: PopupSubject,
    ) -> OverlayResult<PopupView> {
        let content = PopupBuilder::new(&self.config).build(ctx.provider, subject)?;
        let bounds = self.place(ctx.tree, anchor, viewport, content.size())?;
        PopupView::materialize(ctx.tree, viewport, content, bounds)
    }

    fn place(&self, tree: &WidgetTree, anchor: WidgetId, viewport: WidgetId, size: (f32, f32)) -> OverlayResult<Rect> {
        let anchor_rect = tree.get(anchor).ok_or(OverlayError::AnchorMissing(anchor))?.rect;
        let viewport_rect = tree.get(viewport).ok_or(OverlayError::ViewportNotFound(anchor))?.rect;
        Ok(place_popup(anchor_rect, size, viewport_rect, &self.config))
    }

    // =========================================================================
    // Pointer events
    // =========================================================================

    /// The pointer entered `widget`.
    pub fn pointer_enter(&mut self, ctx: &mut HostCtx<'_>, widget: WidgetId) {
        if let Some(index) = self.stack.index_of_popup(widget) {
            self.stack.set_focus(Focus::OnPopup(index));
            return;
        }
        if let Some(subject) = self.hover.subject(widget) {
            self.open(ctx, widget, subject);
        }
    }

    /// The pointer left `widget`. Schedules a debounced collapse check.
    pub fn pointer_exit(&mut self, widget: WidgetId) {
        let opened = self.stack.opened();
        let delay = self.config.exit_delay_frames;

        if let Some(index) = self.stack.index_of_popup(widget) {
            if self.stack.focus() == Focus::OnPopup(index) {
                self.stack.set_focus(Focus::None);
            }
            self.scheduler.schedule(delay, DeferredCheck::PopupExit { index, opened });
        } else if self.hover.is_attached(widget) {
            self.scheduler.schedule(delay, DeferredCheck::IconExit { opened });
        }
    }

    /// `widget` was clicked. Opens its popup if it is an icon inside a popup.
    pub fn click(&mut self, ctx: &mut HostCtx<'_>, widget: WidgetId) {
        if let Some(subject) = self.clicks.get(&widget).copied() {
            self.open(ctx, widget, subject);
        }
    }

    fn run_check(&mut self, tree: &mut WidgetTree, check: DeferredCheck) {
        let decision = decide(check, self.stack.focus(), self.stack.opened());
        tracing::trace!(?check, ?decision, "exit check");
        if decision != Collapse::Keep {
            self.stack.apply(tree, decision);
            self.prune_targets(tree);
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Closes every popup, the collection popup included.
    pub fn close_all(&mut self, tree: &mut WidgetTree) {
        self.stack.collapse_all(tree);
        if let Some(view) = self.collection.take() {
            view.destroy(tree);
            self.poller.mark_shown(None);
        }
        self.prune_targets(tree);
    }

    /// Tears down paused-context state: popups, tracked icons, pending checks.
    pub fn reset(&mut self, tree: &mut WidgetTree) {
        self.stack.collapse_all(tree);
        self.hover.clear();
        self.scanner.clear();
        self.scheduler.clear();
        self.router.clear();
        self.prune_targets(tree);
        tracing::info!("tooltip session reset");
    }

    fn enter_paused(&mut self, tree: &mut WidgetTree) {
        self.poller.clear();
        if let Some(view) = self.collection.take() {
            view.destroy(tree);
        }
        self.prune_targets(tree);
        tracing::info!("entered paused context");
    }

    fn prune_targets(&mut self, tree: &WidgetTree) {
        self.clicks.retain(|&widget, _| tree.contains(widget));
    }

    fn prune_dead(&mut self, tree: &mut WidgetTree) {
        self.stack.prune(tree);
        if self.collection.as_ref().is_some_and(|v| !tree.contains(v.root())) {
            self.collection = None;
            self.poller.mark_shown(None);
        }
        self.hover.retain_alive(tree);
        self.prune_targets(tree);
    }

    /// Runs one host frame.
    pub fn update(&mut self, ctx: &mut HostCtx<'_>, input: &InputState, dt: f32) {
        self.clock += dt;

        let paused = ctx.provider.is_paused();
        match self.paused {
            Some(false) if paused => self.enter_paused(ctx.tree),
            Some(true) if !paused => {
                tracing::info!("left paused context");
                self.reset(ctx.tree);
            }
            _ => {}
        }
        self.paused = Some(paused);

        self.prune_dead(ctx.tree);

        if input.key_pressed(Key::Escape) {
            self.close_all(ctx.tree);
        }

        let mut surfaces: Vec<WidgetId> = self.stack.entries().iter().map(|e| e.widget()).collect();
        surfaces.extend(self.collection.as_ref().map(PopupView::root));
        let icons: Vec<WidgetId> = self.hover.widgets().collect();
        let targets: Vec<WidgetId> = self.clicks.keys().copied().collect();

        for event in self.router.route(ctx.tree, input, &surfaces, icons, targets) {
            match event {
                PointerEvent::Enter(widget) => self.pointer_enter(ctx, widget),
                PointerEvent::Exit(widget) => self.pointer_exit(widget),
                PointerEvent::Click(widget) => self.click(ctx, widget),
            }
        }

        for check in self.scheduler.advance() {
            self.run_check(ctx.tree, check);
        }

        if paused {
            if self.scanner.tick(dt) {
                self.scanner.scan(ctx.tree, ctx.provider, &mut self.hover);
            }
        } else {
            let (x, y) = input.mouse_pos();
            let over_popup = self.collection.as_ref().is_some_and(|v| v.bounds().contains(x, y));
            if over_popup {
                self.poller.cancel_pending();
            } else if let Some(icon) = self.poller.poll(ctx.tree, x, y, self.clock) {
                self.open(ctx, icon.widget, icon.subject);
            }
        }
    }

    /// Emits draw commands for every live popup, bottom of the stack first.
    pub fn render(&self, renderer: &mut UIRenderer) {
        let mut z = POPUP_BASE_Z;
        for entry in self.stack.entries() {
            entry.view.render(&self.theme, renderer, z);
            z += 1;
        }
        if let Some(view) = &self.collection {
            view.render(&self.theme, renderer, z);
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The drill-down stack.
    #[must_use]
    pub fn stack(&self) -> &PopupStack {
        &self.stack
    }

    /// Current hover focus.
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.stack.focus()
    }

    /// Hover-wired icons.
    #[must_use]
    pub fn hover(&self) -> &HoverTracker {
        &self.hover
    }

    /// Icons identified by the scanner.
    #[must_use]
    pub fn scanner(&self) -> &IconScanner {
        &self.scanner
    }

    /// Collection-screen registry and dwell state.
    #[must_use]
    pub fn poller(&self) -> &CollectionPoller {
        &self.poller
    }

    /// The collection-screen popup, if shown.
    #[must_use]
    pub fn collection_popup(&self) -> Option<&PopupView> {
        self.collection.as_ref()
    }

    /// Subject opened by clicking `widget`, if it is a popup icon.
    #[must_use]
    pub fn click_target(&self, widget: WidgetId) -> Option<PopupSubject> {
        self.clicks.get(&widget).copied()
    }

    /// Exit checks still waiting.
    #[must_use]
    pub fn pending_checks(&self) -> usize {
        self.scheduler.pending()
    }
}

impl Default for TooltipSession {
    fn default() -> Self {
        Self::with_valid_config(TooltipConfig::default())
    }
}
