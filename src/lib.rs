//! # Cat Tycoon Economy Server
//!
//! Server-side economy engine for the Cat Tycoon idle clicker.
//! Tracks each player's score, energy, and level, and folds elapsed
//! real-world time into passive income and energy regeneration whenever
//! the player reconnects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CAT TYCOON ECONOMY SERVER                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  economy/        - Pure economy model (no I/O)               │
//! │  ├── rates.rs    - Level -> profit/hour rate table           │
//! │  └── model.rs    - Offline-progress reconciliation math      │
//! │                                                              │
//! │  player.rs       - Persisted record and client-facing view   │
//! │                                                              │
//! │  store/          - Record persistence seam                   │
//! │  ├── mod.rs      - RecordStore trait                         │
//! │  └── memory.rs   - In-memory BTreeMap store                  │
//! │                                                              │
//! │  service/        - Reconciliation service                    │
//! │  └── mod.rs      - Per-user serialization, get/save state    │
//! │                                                              │
//! │  network/        - HTTP surface (non-deterministic)          │
//! │  ├── protocol.rs - Wire request/response bodies              │
//! │  └── http.rs     - Router, handlers, server loop             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Contract
//!
//! Reconciliation for a given user id is **serialized**: the
//! read-compute-write sequence of `get_state` never interleaves with
//! another `get_state` or `save_state` for the same user, so elapsed
//! time is credited at most once and a save is never clobbered by a
//! concurrently computed reconciliation. Distinct user ids never
//! contend with each other.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod economy;
pub mod network;
pub mod player;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use economy::model::{reconcile, Accrual, EconomyConfig};
pub use economy::rates::{profit_per_hour, PROFIT_TABLE};
pub use player::{StateView, UserId, UserState};
pub use service::{EconomyService, SaveSnapshot, ServiceError};
pub use store::memory::MemoryStore;
pub use store::{RecordStore, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Energy cap: regeneration never pushes energy above this.
pub const MAX_ENERGY: u32 = 100;

/// Energy regenerated per second of elapsed time.
pub const ENERGY_PER_SECOND: u32 = 1;
