//! # Matilha Core
//!
//! Scheduling and payment reconciliation for group dog walks ("matilhas").
//!
//! ## Features
//!
//! - **Dates**: strict `DD/MM/YYYY` parsing and Saturday/Sunday/Holiday classification
//! - **Ordering**: upcoming sessions soonest first, then past sessions most recent first,
//!   with sessions holding unparseable dates reported instead of dropped
//! - **Reconciliation**: expected and received totals per session and per walker
//! - **Registries**: dogs, walkers and sessions behind a storage trait, with an
//!   in-memory copy-on-write implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use matilha_core::{order_sessions, utils::MemoryStorage, Reconciliation};
//! use chrono::NaiveDate;
//!
//! let storage = MemoryStorage::seeded();
//! let sessions = storage.session_snapshot().unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//!
//! for session in order_sessions(sessions.iter(), today).ordered() {
//!     let summary = Reconciliation::for_session(session);
//!     println!("{}: {} expected", session.title(), summary.expected_total);
//! }
//! ```

pub mod calendar;
pub mod reconciliation;
pub mod schedule;
pub mod settings;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use calendar::*;
pub use reconciliation::{Reconciliation, Settlement};
pub use schedule::*;
pub use settings::*;
pub use traits::*;
pub use types::*;
