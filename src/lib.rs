//! # Clickbridge - Host Game Event Bridge
//!
//! Observes raw lifecycle and input callbacks from a running game and forwards
//! a normalized event stream to an external timing/audio consumer:
//! - Session state (`is_in_level`, current level time)
//! - Timestamped button actions with player 1 / player 2 resolution
//! - Level lifecycle (init, reset, quit, death)
//! - The native drawing surface, for render synchronization
//!
//! ## Architecture
//!
//! Everything runs synchronously on the host's single update thread. The
//! `Bridge` owns all mutable state:
//! ```text
//!                    ┌──────────────────────────────────┐
//!  host callbacks →  │             Bridge               │  → Consumer
//!                    │  ┌──────────┐ ┌──────────────┐   │
//!                    │  │  Hook    │ │  Lifecycle   │   │
//!                    │  │ Arbiter  │ │  Notifier    │   │
//!                    │  └────┬─────┘ └──────┬───────┘   │
//!                    │  ┌────▼─────┐ ┌──────▼───────┐   │
//!                    │  │  Input   │ │ SessionState │   │
//!                    │  │Classifier│ │ + TimeSource │   │
//!                    │  └──────────┘ └──────────────┘   │
//!                    │  ┌──────────────────────────┐    │
//!                    │  │ FramePresentationTap     │    │
//!                    │  └──────────────────────────┘    │
//!                    └──────────────────────────────────┘
//! ```
//! Raw reads from host objects are confined to [`host::layout`].

// Enforce strict safety at compile time; host::layout opts back in.
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod bridge;
pub mod events;
pub mod frame;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod replay;
pub mod session;
pub mod time_source;
pub mod types;

// Internal utilities
pub mod observability;

pub use bridge::Bridge;
pub use events::{BridgeEvent, Consumer, LifecycleEvent, Recorder};
pub use host::{Actor, Host, HostLayout};
pub use input::{NormalizedAction, RawInputSignal};
pub use session::SessionState;
pub use types::{Config, Error, Result};
