//! Widget mirror for the host hierarchy.
//!
//! Only identity, naming, parentage and screen rects are mirrored; the
//! host keeps ownership of the real widgets.

mod core;
mod tree;

pub use core::{WidgetId, WidgetState, WidgetFlags};
pub use tree::WidgetTree;
