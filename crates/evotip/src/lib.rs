//! # EVOTIP
//!
//! Drill-down item tooltips layered onto a running game.
//!
//! Icons discovered in the host's views get hover popups describing the
//! item: header, description, evolution formulas and active arcana. Icons
//! inside a popup open child popups, forming a chain that collapses as the
//! pointer leaves it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   Sighting   ┌──────────────┐   attach   ┌──────────────┐
//! │  Discovery   │─────────────>│ IconScanner  │───────────>│ HoverTracker │
//! └──────────────┘              └──────────────┘            └──────┬───────┘
//!                                                                  │ enter
//! ┌──────────────┐   dwell      ┌──────────────┐   open     ┌──────▼───────┐
//! │  Collection  │─────────────>│   Session    │<───────────│ PointerRouter│
//! │    Poller    │              └──────┬───────┘            └──────────────┘
//! └──────────────┘                     │ build / place
//!                               ┌──────▼───────┐   exit     ┌──────────────┐
//!                               │  PopupStack  │<───────────│FrameScheduler│
//!                               └──────────────┘  checks    └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut session = TooltipSession::new(TooltipConfig::from_toml_str(&config)?)?;
//! let feed = session.sighting_sender();
//!
//! // every host frame
//! feed.send(Sighting::new(widget, "weapon_42"));
//! session.update(&mut HostCtx::new(&mut tree, &catalog), &input, dt);
//! session.render(&mut renderer);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod hover;
pub mod placement;
pub mod pointer;
pub mod poller;
pub mod scanner;
pub mod schedule;
pub mod session;
pub mod stack;
pub mod subject;
pub mod view;

pub use config::TooltipConfig;
pub use content::{EvolutionRow, PopupBuilder, PopupContent};
pub use error::{OverlayError, OverlayResult};
pub use feed::{Sighting, SightingSender};
pub use hover::HoverTracker;
pub use placement::place_popup;
pub use pointer::{PointerEvent, PointerRouter};
pub use poller::{CollectionIcon, CollectionPoller, PendingHover};
pub use scanner::{IconScanner, TrackedIcon};
pub use schedule::{DeferredCheck, FrameScheduler};
pub use session::{HostCtx, TooltipSession};
pub use stack::{Focus, PopupEntry, PopupStack};
pub use subject::PopupSubject;
pub use view::PopupView;
