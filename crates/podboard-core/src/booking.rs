//! Bookings and the in-memory booking store.
//!
//! A booking occupies one slot: a (pod, time) pair. The store keeps bookings
//! in insertion order; the shell shows them with positional indices and
//! removal is by that index.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::CoreError;

/// Error from parsing a slot time string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("time must be in HH:MM format")]
pub struct ParseSlotTimeError;

/// A slot start time, strictly `HH:MM` (zero-padded, 24-hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Build from components; minutes-only precision.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(SlotTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for SlotTime {
    type Err = ParseSlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts single-digit hours; the slot format does not.
        if s.len() != 5 || s.as_bytes()[2] != b':' {
            return Err(ParseSlotTimeError);
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(SlotTime)
            .map_err(|_| ParseSlotTimeError)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// One booked slot: which pod, when, and the roster of student IDs.
///
/// Student IDs are stored upper-cased and are unique within one booking;
/// the rule engine enforces both before a booking is created or merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub pod_id: String,
    pub time: SlotTime,
    pub students: Vec<String>,
}

impl Booking {
    pub fn new(pod_id: impl Into<String>, time: SlotTime, students: Vec<String>) -> Self {
        Self {
            pod_id: pod_id.into(),
            time,
            students,
        }
    }

    pub fn seats(&self) -> usize {
        self.students.len()
    }

    pub fn contains_student(&self, id: &str) -> bool {
        self.students.iter().any(|s| s == id)
    }
}

/// Insertion-ordered collection of bookings, owned by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// The booking occupying (pod, time), if any.
    pub fn find(&self, pod_id: &str, time: SlotTime) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.pod_id == pod_id && b.time == time)
    }

    /// Append students to an existing slot booking, or create the slot.
    /// Returns `true` when an existing booking was merged into.
    pub fn merge_or_insert(&mut self, pod_id: &str, time: SlotTime, students: &[String]) -> bool {
        if let Some(existing) = self
            .bookings
            .iter_mut()
            .find(|b| b.pod_id == pod_id && b.time == time)
        {
            existing.students.extend_from_slice(students);
            true
        } else {
            self.bookings
                .push(Booking::new(pod_id, time, students.to_vec()));
            false
        }
    }

    /// Read a booking list from a JSON file (an array of bookings). Used by
    /// one-shot hosts that take a snapshot of bookings as input; live
    /// sessions never persist.
    pub fn load_json(path: &std::path::Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        let bookings: Vec<Booking> = serde_json::from_str(&raw)?;
        Ok(Self { bookings })
    }

    /// Remove the booking at `index` (display order).
    pub fn remove(&mut self, index: usize) -> Result<Booking, CoreError> {
        if index >= self.bookings.len() {
            return Err(CoreError::OutOfBounds {
                index,
                len: self.bookings.len(),
            });
        }
        Ok(self.bookings.remove(index))
    }
}

impl From<Vec<Booking>> for BookingStore {
    fn from(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }
}
