//! # EVOTIP UI
//!
//! Host-side UI primitives for the evotip tooltip overlay:
//! - A mirror of the host widget hierarchy (names, parents, rects)
//! - Screen-space geometry and row layout
//! - Per-frame pointer and keyboard state
//! - Render commands the host turns into draw calls
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                        │
//! ├────────────────────────────────────────────────────────┤
//! │  Host Widgets → Widget Mirror → Hit Test → Popups      │
//! │       ↓              ↓             ↓          ↓        │
//! │   Discovery     Ancestor Walk  Enter/Exit  Commands    │
//! └────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod widget;
pub mod layout;
pub mod render;
pub mod input;
pub mod style;
pub mod text;

pub use widget::{WidgetId, WidgetState, WidgetFlags, WidgetTree};
pub use layout::{Alignment, Layout, Rect};
pub use render::{UIRenderer, RenderCommand, UIBatch};
pub use input::{InputState, MouseButton, Key};
pub use style::{Color, Theme};
pub use text::{wrap_text, TextMetrics};
