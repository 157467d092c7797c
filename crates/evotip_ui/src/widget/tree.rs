//! Widget tree mirroring the host hierarchy.

use super::{WidgetId, WidgetState};
use crate::layout::Rect;
use std::collections::HashMap;

/// First id handed out for overlay-created widgets.
///
/// Host instance ids are mirrored verbatim and stay far below this range.
const OVERLAY_ID_BASE: u64 = 1 << 48;

/// Mirrors the host widget hierarchy.
pub struct WidgetTree {
    /// Widget states indexed by ID.
    widgets: HashMap<WidgetId, WidgetState>,
    /// Root widget IDs.
    roots: Vec<WidgetId>,
    /// Parent-child relationships, in insertion order.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// ID counter for overlay widgets.
    next_id: u64,
}

impl WidgetTree {
    /// Creates a new empty widget tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::with_capacity(256),
            roots: Vec::with_capacity(16),
            children: HashMap::with_capacity(256),
            next_id: OVERLAY_ID_BASE,
        }
    }

    /// Generates a new unique widget ID for an overlay widget.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root widget.
    pub fn add_root(&mut self, state: WidgetState) {
        let id = state.id;
        let mut state = state;
        state.parent = None;
        self.widgets.insert(id, state);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
    }

    /// Adds a child widget to a parent.
    ///
    /// Returns false (and inserts nothing) if the parent is unknown.
    pub fn add_child(&mut self, parent: WidgetId, state: WidgetState) -> bool {
        if !self.widgets.contains_key(&parent) {
            tracing::debug!(%parent, child = %state.id, "dropping child of unknown widget");
            return false;
        }

        let id = state.id;
        let mut state = state;
        state.parent = Some(parent);

        self.widgets.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        true
    }

    /// Removes a widget and all its children.
    pub fn remove(&mut self, id: WidgetId) {
        // Remove all children first
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove(child);
            }
        }

        // Remove from parent's children list
        if let Some(parent) = self.widgets.get(&id).and_then(|state| state.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);
        self.widgets.remove(&id);
    }

    /// Returns true if the widget is alive in the mirror.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Gets a widget state by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&id)
    }

    /// Gets mutable access to a widget state.
    #[must_use]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.widgets.get_mut(&id)
    }

    /// Updates a widget's screen rectangle.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(state) = self.widgets.get_mut(&id) {
            state.rect = rect;
        }
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root widgets.
    #[must_use]
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Returns the number of mirrored widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if nothing is mirrored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Walks the parent chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        let mut current = self.widgets.get(&id).and_then(|s| s.parent);
        std::iter::from_fn(move || {
            let id = current?;
            current = self.widgets.get(&id).and_then(|s| s.parent);
            Some(id)
        })
    }

    /// Returns true if `id` is `ancestor` or lives somewhere below it.
    #[must_use]
    pub fn is_descendant_of(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        if !self.widgets.contains_key(&id) {
            return false;
        }
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Finds the nearest ancestor of `id` whose name is one of `names`.
    #[must_use]
    pub fn find_ancestor_named<S: AsRef<str>>(&self, id: WidgetId, names: &[S]) -> Option<WidgetId> {
        self.ancestors(id).find(|a| {
            self.widgets
                .get(a)
                .is_some_and(|s| names.iter().any(|n| n.as_ref() == s.name))
        })
    }

    /// Returns all widget IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns the subtree of `root` in depth-first order, `root` first.
    pub fn iter_subtree(&self, root: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        let stack = if self.widgets.contains_key(&root) { vec![root] } else { Vec::new() };
        WidgetDfsIterator { tree: self, stack }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
