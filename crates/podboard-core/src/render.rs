//! Rendering seam between the core and whatever hosts it.
//!
//! The rule engine and insights calculator never print; a host implements
//! [`Render`] and the session results flow through it. This keeps the core
//! unit-testable and lets the CLI, a GUI, or a test double present the same
//! data their own way.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::insights::InsightsSnapshot;

/// Flavor of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Presentation surface for session output.
pub trait Render {
    /// Show the booking list in display (insertion) order.
    fn render_bookings(&mut self, bookings: &[Booking]);

    /// Show the summary statistics.
    fn render_insights(&mut self, snapshot: &InsightsSnapshot);

    /// Show a status or violation message.
    fn show_message(&mut self, kind: MessageKind, text: &str);
}
