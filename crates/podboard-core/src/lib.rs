//! # Podboard Core Library
//!
//! Booking logic for shared study pods: reserve seats in one of a fixed set
//! of rooms for a time slot, enforce the scheduling rules, and derive usage
//! statistics. The library is CLI-first: every operation is available through
//! the `podboard-cli` binary, and any other host (a GUI shell, a test double)
//! is a thin layer over the same session type.
//!
//! ## Architecture
//!
//! - **Rule Engine**: pure validation of a booking request against the
//!   catalog, operating hours, and current store; all violations collected
//! - **Insights Calculator**: summary statistics recomputed from the store
//!   after every mutation
//! - **Session**: owns the store and the duplicate-attempt counter and runs
//!   validate -> mutate -> recompute as one uninterleaved sequence
//! - **Render seam**: hosts implement [`Render`] to present bookings,
//!   insights, and messages
//!
//! ## Key Components
//!
//! - [`BookingSession`]: session state machine
//! - [`RuleEngine`]: rule evaluation
//! - [`compute_insights`]: statistics derivation
//! - [`Config`]: pod catalog and operating-hours configuration

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod insights;
pub mod render;
pub mod roster;
pub mod rules;
pub mod session;

pub use booking::{Booking, BookingStore, SlotTime};
pub use catalog::{Pod, PodCatalog};
pub use config::{Config, HoursConfig};
pub use error::{ConfigError, CoreError};
pub use events::SessionEvent;
pub use insights::{compute_insights, InsightsSnapshot, PodFillRate};
pub use render::{MessageKind, Render};
pub use roster::parse_student_ids;
pub use rules::{BookingRequest, RuleEngine, ValidationReport, Violation, ViolationKind};
pub use session::{BookingSession, SubmitOutcome};
