//! Session events.
//!
//! Every state change in a session produces an event. The shell drains them
//! after each action to decide what to tell the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::SlotTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A new slot was booked.
    BookingCreated {
        pod_id: String,
        time: SlotTime,
        students: Vec<String>,
        at: DateTime<Utc>,
    },
    /// Students were appended to an already-booked slot.
    BookingMerged {
        pod_id: String,
        time: SlotTime,
        added: Vec<String>,
        total_seats: usize,
        at: DateTime<Utc>,
    },
    /// A booking was removed by display index.
    BookingRemoved {
        pod_id: String,
        time: SlotTime,
        students: Vec<String>,
        at: DateTime<Utc>,
    },
    /// A request was rejected with one or more violations.
    BookingRejected {
        violations: usize,
        at: DateTime<Utc>,
    },
}
