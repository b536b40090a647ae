//! Aggregate usage statistics over the booking store.
//!
//! Recomputed from scratch after every mutation; given the same store and
//! catalog the snapshot is identical, so the shell can recompute freely.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::booking::{BookingStore, SlotTime};
use crate::catalog::PodCatalog;

/// Seat usage for one catalog pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodFillRate {
    pub pod_id: String,
    /// Students booked across every slot of this pod.
    pub booked_seats: usize,
    /// Distinct times this pod has a booking for.
    pub slots_used: usize,
    /// Percent of possible seats filled over the used slots, one decimal.
    pub fill_rate: f64,
}

/// Summary statistics for the current booking list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSnapshot {
    /// Number of booked slots, not students.
    pub total_bookings: usize,
    /// Distinct student IDs across all bookings.
    pub unique_students: usize,
    /// Time with the largest summed student count; ties go to the time seen
    /// first in insertion order. `None` when nothing is booked.
    pub busiest_hour: Option<SlotTime>,
    /// One entry per catalog pod, in catalog order.
    pub pod_fill_rates: Vec<PodFillRate>,
    /// Running count of duplicate booking attempts this session.
    pub duplicate_attempts: u64,
}

/// Derive the snapshot for the current store.
pub fn compute_insights(
    store: &BookingStore,
    catalog: &PodCatalog,
    duplicate_attempts: u64,
) -> InsightsSnapshot {
    let bookings = store.bookings();

    let mut unique = HashSet::new();
    for booking in bookings {
        for id in &booking.students {
            unique.insert(id.as_str());
        }
    }

    // Accumulate per-time totals in first-seen order so the strict `>` scan
    // below resolves ties to the earliest-booked time.
    let mut by_time: Vec<(SlotTime, usize)> = Vec::new();
    for booking in bookings {
        match by_time.iter_mut().find(|(t, _)| *t == booking.time) {
            Some((_, count)) => *count += booking.seats(),
            None => by_time.push((booking.time, booking.seats())),
        }
    }
    let mut busiest_hour = None;
    let mut busiest_count = 0usize;
    for (time, count) in &by_time {
        if *count > busiest_count {
            busiest_hour = Some(*time);
            busiest_count = *count;
        }
    }

    let pod_fill_rates = catalog
        .pods()
        .iter()
        .map(|pod| {
            let booked_seats: usize = bookings
                .iter()
                .filter(|b| b.pod_id == pod.id)
                .map(|b| b.seats())
                .sum();
            let mut times: Vec<SlotTime> = bookings
                .iter()
                .filter(|b| b.pod_id == pod.id)
                .map(|b| b.time)
                .collect();
            times.sort_unstable();
            times.dedup();
            let slots_used = times.len();
            let fill_rate = if slots_used > 0 {
                round1(booked_seats as f64 / (pod.capacity as usize * slots_used) as f64 * 100.0)
            } else {
                0.0
            };
            PodFillRate {
                pod_id: pod.id.clone(),
                booked_seats,
                slots_used,
                fill_rate,
            }
        })
        .collect();

    InsightsSnapshot {
        total_bookings: bookings.len(),
        unique_students: unique.len(),
        busiest_hour,
        pod_fill_rates,
        duplicate_attempts,
    }
}

/// Round to one decimal place, halves away from zero.
fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    ((scaled.abs() + 0.5).floor().copysign(scaled)) / 10.0
}
