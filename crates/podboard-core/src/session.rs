//! Session orchestration.
//!
//! A [`BookingSession`] owns the store, the catalog, and the duplicate-attempt
//! counter, and runs the whole validate -> mutate -> recompute sequence behind
//! `&mut self`. One action completes before the next is accepted, which is all
//! the serialization this single-user model needs.

use std::collections::VecDeque;

use chrono::Utc;

use crate::booking::{Booking, BookingStore, SlotTime};
use crate::catalog::PodCatalog;
use crate::config::{Config, HoursConfig};
use crate::error::Result;
use crate::events::SessionEvent;
use crate::insights::{compute_insights, InsightsSnapshot};
use crate::roster::parse_student_ids;
use crate::rules::{BookingRequest, RuleEngine, Violation};

/// Result of submitting one booking request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Request accepted; the store was mutated and insights recomputed.
    Booked {
        /// Whether an existing slot booking was appended to.
        merged: bool,
        insights: InsightsSnapshot,
    },
    /// Request rejected; the store is untouched (the duplicate-attempt
    /// counter may still have advanced).
    Rejected { violations: Vec<Violation> },
}

/// One user's in-memory booking session.
#[derive(Debug, Clone)]
pub struct BookingSession {
    catalog: PodCatalog,
    hours: HoursConfig,
    store: BookingStore,
    duplicate_attempts: u64,
    events: VecDeque<SessionEvent>,
}

impl BookingSession {
    /// Start an empty session over the given catalog and hours.
    pub fn new(catalog: PodCatalog, hours: HoursConfig) -> Self {
        Self {
            catalog,
            hours,
            store: BookingStore::new(),
            duplicate_attempts: 0,
            events: VecDeque::new(),
        }
    }

    /// Start a session from application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog(), config.hours)
    }

    pub fn catalog(&self) -> &PodCatalog {
        &self.catalog
    }

    pub fn bookings(&self) -> &[Booking] {
        self.store.bookings()
    }

    pub fn duplicate_attempts(&self) -> u64 {
        self.duplicate_attempts
    }

    /// Validate and, on success, book. `roster_text` is the raw comma-separated
    /// input; parsing happens here so hosts only ever hand over form text.
    pub fn submit(&mut self, pod_id: &str, time: &str, roster_text: &str) -> SubmitOutcome {
        let students = parse_student_ids(roster_text);
        let request = BookingRequest::new(pod_id, time, students);

        let report = RuleEngine::new(&self.catalog, &self.hours).validate(&request, &self.store);
        self.duplicate_attempts += report.duplicate_attempts;

        if !report.is_valid() {
            self.events.push_back(SessionEvent::BookingRejected {
                violations: report.violations.len(),
                at: Utc::now(),
            });
            return SubmitOutcome::Rejected {
                violations: report.violations,
            };
        }

        let Ok(slot) = request.time.trim().parse::<SlotTime>() else {
            // validate() rejects unparseable times, so a valid report
            // guarantees this parse; keep the rejection path anyway.
            return SubmitOutcome::Rejected {
                violations: report.violations,
            };
        };

        let pod_id = self
            .catalog
            .get(request.pod_id.trim())
            .map(|p| p.id.clone())
            .unwrap_or_else(|| request.pod_id.trim().to_string());

        let merged = self
            .store
            .merge_or_insert(&pod_id, slot, &request.students);

        tracing::info!(pod = %pod_id, time = %slot, students = request.students.len(), merged,
            "booking accepted");

        self.events.push_back(if merged {
            let total_seats = self.store.find(&pod_id, slot).map_or(0, |b| b.seats());
            SessionEvent::BookingMerged {
                pod_id,
                time: slot,
                added: request.students,
                total_seats,
                at: Utc::now(),
            }
        } else {
            SessionEvent::BookingCreated {
                pod_id,
                time: slot,
                students: request.students,
                at: Utc::now(),
            }
        });

        SubmitOutcome::Booked {
            merged,
            insights: self.insights(),
        }
    }

    /// Remove a booking by its display index. The duplicate-attempt counter
    /// is left alone.
    pub fn remove(&mut self, index: usize) -> Result<Booking> {
        let booking = self.store.remove(index)?;
        tracing::info!(pod = %booking.pod_id, time = %booking.time, "booking removed");
        self.events.push_back(SessionEvent::BookingRemoved {
            pod_id: booking.pod_id.clone(),
            time: booking.time,
            students: booking.students.clone(),
            at: Utc::now(),
        });
        Ok(booking)
    }

    /// Current summary statistics.
    pub fn insights(&self) -> InsightsSnapshot {
        compute_insights(&self.store, &self.catalog, self.duplicate_attempts)
    }

    /// Drain pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }
}
