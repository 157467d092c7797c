//! # Popup Stack
//!
//! The chain of open drill-down popups. Entry `i + 1` is always anchored
//! inside entry `i`'s popup; index 0 is anchored on a host icon.
//!
//! ```text
//! host icon ──> [0] Whip ──> [1] Hollow Heart ──> [2] Game Killer
//!                  ^ focus: the popup under the pointer
//! ```
//!
//! The stack only ever shrinks from the top. Collapse decisions for
//! debounced exits are pure functions of (focus, opens since scheduling),
//! so a stale check re-reads live state instead of being cancelled.

use evotip_ui::{WidgetId, WidgetTree};

use crate::schedule::DeferredCheck;
use crate::view::PopupView;

/// Which popup the pointer is physically over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Not over any popup.
    #[default]
    None,
    /// Over the popup at this stack index.
    OnPopup(usize),
}

/// What a deferred exit check decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse {
    /// Leave the stack alone.
    Keep,
    /// Close every popup above this index.
    Above(usize),
    /// Close everything.
    All,
}

impl Collapse {
    /// Collapse everything above the focused popup.
    #[must_use]
    pub fn above_focus(focus: Focus) -> Self {
        match focus {
            Focus::None => Self::All,
            Focus::OnPopup(index) => Self::Above(index),
        }
    }
}

/// Resolves a debounced exit check against the live stack.
///
/// `opened` is the live open counter; a check scheduled before the latest
/// open is stale and keeps the stack.
#[must_use]
pub fn decide(check: DeferredCheck, focus: Focus, opened: u64) -> Collapse {
    match check {
        DeferredCheck::IconExit { opened: at } => {
            if opened != at || focus != Focus::None {
                Collapse::Keep
            } else {
                Collapse::above_focus(focus)
            }
        }
        DeferredCheck::PopupExit { index, opened: at } => {
            if opened != at {
                return Collapse::Keep;
            }
            match focus {
                Focus::OnPopup(f) if f >= index => Collapse::Keep,
                _ => Collapse::above_focus(focus),
            }
        }
    }
}

/// One open popup.
#[derive(Debug, Clone)]
pub struct PopupEntry {
    /// Widget whose hover or click opened the popup.
    pub anchor: WidgetId,
    /// Position in the stack.
    pub depth: usize,
    /// The popup itself.
    pub view: PopupView,
}

impl PopupEntry {
    /// Root widget of the popup.
    #[must_use]
    pub fn widget(&self) -> WidgetId {
        self.view.root()
    }
}

/// Ordered chain of open popups plus hover focus.
#[derive(Debug, Default)]
pub struct PopupStack {
    entries: Vec<PopupEntry>,
    focus: Focus,
    opened: u64,
}

impl PopupStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(4),
            focus: Focus::None,
            opened: 0,
        }
    }

    /// Number of open popups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open popups, bottom first.
    #[must_use]
    pub fn entries(&self) -> &[PopupEntry] {
        &self.entries
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PopupEntry> {
        self.entries.get(index)
    }

    /// Current hover focus.
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Sets hover focus. Indices past the top are ignored.
    pub fn set_focus(&mut self, focus: Focus) {
        match focus {
            Focus::OnPopup(index) if index >= self.entries.len() => {
                tracing::trace!(index, "focus on a closed popup ignored");
            }
            _ => self.focus = focus,
        }
    }

    /// Popups opened over the stack's lifetime.
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.opened
    }

    /// Returns true if a popup anchored on `anchor` is open.
    #[must_use]
    pub fn contains_anchor(&self, anchor: WidgetId) -> bool {
        self.entries.iter().any(|e| e.anchor == anchor)
    }

    /// Stack index of the popup whose root is `widget`.
    #[must_use]
    pub fn index_of_popup(&self, widget: WidgetId) -> Option<usize> {
        self.entries.iter().position(|e| e.widget() == widget)
    }

    /// Deepest entry whose popup subtree contains `anchor`.
    #[must_use]
    pub fn parent_of(&self, tree: &WidgetTree, anchor: WidgetId) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| tree.is_descendant_of(anchor, e.widget()))
    }

    /// Pushes a popup on top and returns its index.
    pub fn push(&mut self, anchor: WidgetId, view: PopupView) -> usize {
        let depth = self.entries.len();
        self.entries.push(PopupEntry { anchor, depth, view });
        self.opened += 1;
        depth
    }

    /// Destroys and pops every entry above `index`, top first.
    pub fn collapse_above(&mut self, tree: &mut WidgetTree, index: usize) {
        while self.entries.len() > index + 1 {
            if let Some(entry) = self.entries.pop() {
                entry.view.destroy(tree);
            }
        }
        if let Focus::OnPopup(f) = self.focus {
            if f > index {
                self.focus = Focus::None;
            }
        }
    }

    /// Destroys every popup and clears focus.
    pub fn collapse_all(&mut self, tree: &mut WidgetTree) {
        while let Some(entry) = self.entries.pop() {
            entry.view.destroy(tree);
        }
        self.focus = Focus::None;
    }

    /// Applies a collapse decision.
    pub fn apply(&mut self, tree: &mut WidgetTree, collapse: Collapse) {
        match collapse {
            Collapse::Keep => {}
            Collapse::Above(index) => self.collapse_above(tree, index),
            Collapse::All => self.collapse_all(tree),
        }
    }

    /// Drops entries whose popup widget vanished from the mirror.
    ///
    /// The host may tear a viewport down under an open popup; everything
    /// from the first missing entry up goes with it.
    pub fn prune(&mut self, tree: &mut WidgetTree) {
        if let Some(first_dead) = self.entries.iter().position(|e| !tree.contains(e.widget())) {
            if first_dead == 0 {
                self.collapse_all(tree);
            } else {
                self.collapse_above(tree, first_dead - 1);
            }
        }
    }
}
