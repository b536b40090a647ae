//! Booking validation rules.
//!
//! The engine is a pure function of the request, the store, and the catalog
//! and hours it was built with. All applicable rules are evaluated and every
//! violation is collected, with one exception: a duplicate ID inside the
//! request itself rejects the whole request with a single message before any
//! rule runs.
//!
//! Duplicate-attempt bookkeeping is explicit state: the report carries the
//! number of increments this validation produced and the session accumulates
//! them. The engine never touches a counter itself.

use serde::{Deserialize, Serialize};

use crate::booking::{BookingStore, SlotTime};
use crate::catalog::{Pod, PodCatalog};
use crate::config::HoursConfig;

/// What kind of rule was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Pod, time, or roster not supplied (or pod not in the catalog).
    MissingField,
    /// Time not `HH:MM`, or outside operating hours.
    MalformedTime,
    /// Parsed roster is empty.
    EmptyRoster,
    /// Slot would exceed the pod's seat capacity.
    CapacityExceeded,
    /// Student already booked in this exact slot.
    IntraSlotDuplicate,
    /// Student already booked in a different pod at the same time.
    CrossPodClash,
    /// The request lists the same student twice.
    InRequestDuplicate,
}

/// A single broken rule with the field it applies to and a display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Form field the violation points at ("pod", "time", "students").
    pub field: String,
    /// Human-readable message shown to the user.
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, field: &str, message: String) -> Self {
        Self {
            kind,
            field: field.to_string(),
            message,
        }
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every broken rule, in evaluation order. Empty means the request is
    /// acceptable.
    pub violations: Vec<Violation>,
    /// How many duplicate-attempt increments this pass produced (one per
    /// intra-slot duplicate or cross-pod clash).
    pub duplicate_attempts: u64,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

/// A booking request as collected by the shell, time still raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub pod_id: String,
    pub time: String,
    /// Already parsed and normalized by [`crate::roster::parse_student_ids`].
    pub students: Vec<String>,
}

impl BookingRequest {
    pub fn new(pod_id: impl Into<String>, time: impl Into<String>, students: Vec<String>) -> Self {
        Self {
            pod_id: pod_id.into(),
            time: time.into(),
            students,
        }
    }
}

/// Validates booking requests against the catalog, hours, and current store.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    catalog: &'a PodCatalog,
    hours: &'a HoursConfig,
}

impl<'a> RuleEngine<'a> {
    pub fn new(catalog: &'a PodCatalog, hours: &'a HoursConfig) -> Self {
        Self { catalog, hours }
    }

    /// Whether `time` parses as `HH:MM` and starts inside operating hours.
    pub fn is_within_operating_hours(&self, time: &str) -> bool {
        time.trim()
            .parse::<SlotTime>()
            .map(|t| self.hours.contains(t.hour()))
            .unwrap_or(false)
    }

    /// Run every rule against the request and collect all violations.
    pub fn validate(&self, request: &BookingRequest, store: &BookingStore) -> ValidationReport {
        // A duplicate inside the request rejects it outright, before the
        // rules run and without counting as a duplicate attempt.
        if let Some(dup) = first_in_request_duplicate(&request.students) {
            let report = ValidationReport {
                violations: vec![Violation::new(
                    ViolationKind::InRequestDuplicate,
                    "students",
                    format!("{dup} is listed more than once in this request."),
                )],
                duplicate_attempts: 0,
            };
            tracing::debug!(pod = %request.pod_id, time = %request.time, %dup,
                "request rejected: duplicate id in request");
            return report;
        }

        let mut violations = Vec::new();
        let mut duplicate_attempts = 0u64;

        let pod = self.check_pod(request, &mut violations);
        let time = self.check_time(request, &mut violations);

        if request.students.is_empty() {
            violations.push(Violation::new(
                ViolationKind::EmptyRoster,
                "students",
                "Add at least one student ID.".to_string(),
            ));
        }

        if let (Some(pod), Some(time)) = (pod, time) {
            self.check_capacity(pod, time, request, store, &mut violations);
            self.check_slot_duplicates(
                pod,
                time,
                request,
                store,
                &mut violations,
                &mut duplicate_attempts,
            );
        }

        tracing::debug!(
            pod = %request.pod_id,
            time = %request.time,
            students = request.students.len(),
            violations = violations.len(),
            duplicate_attempts,
            "validated booking request"
        );

        ValidationReport {
            violations,
            duplicate_attempts,
        }
    }

    fn check_pod(&self, request: &BookingRequest, violations: &mut Vec<Violation>) -> Option<&Pod> {
        let id = request.pod_id.trim();
        if id.is_empty() {
            violations.push(Violation::new(
                ViolationKind::MissingField,
                "pod",
                "Select a study pod.".to_string(),
            ));
            return None;
        }
        match self.catalog.get(id) {
            Some(pod) => Some(pod),
            None => {
                violations.push(Violation::new(
                    ViolationKind::MissingField,
                    "pod",
                    format!("Unknown pod '{id}'."),
                ));
                None
            }
        }
    }

    fn check_time(
        &self,
        request: &BookingRequest,
        violations: &mut Vec<Violation>,
    ) -> Option<SlotTime> {
        let raw = request.time.trim();
        if raw.is_empty() {
            violations.push(Violation::new(
                ViolationKind::MissingField,
                "time",
                "Choose a time slot.".to_string(),
            ));
            return None;
        }
        match raw.parse::<SlotTime>() {
            Ok(time) => {
                if !self.hours.contains(time.hour()) {
                    violations.push(Violation::new(
                        ViolationKind::MalformedTime,
                        "time",
                        format!(
                            "Pods are open {:02}:00-{:02}:00; {time} is outside operating hours.",
                            self.hours.open_hour, self.hours.close_hour
                        ),
                    ));
                }
                // Duplicate checks still run for an out-of-hours time.
                Some(time)
            }
            Err(_) => {
                violations.push(Violation::new(
                    ViolationKind::MalformedTime,
                    "time",
                    format!("'{raw}' is not a valid time; use HH:MM."),
                ));
                None
            }
        }
    }

    fn check_capacity(
        &self,
        pod: &Pod,
        time: SlotTime,
        request: &BookingRequest,
        store: &BookingStore,
        violations: &mut Vec<Violation>,
    ) {
        let current = store.find(&pod.id, time).map_or(0, |b| b.seats());
        let adding = request.students.len();
        if current + adding > pod.capacity as usize {
            violations.push(Violation::new(
                ViolationKind::CapacityExceeded,
                "students",
                format!(
                    "{} at {time} has {current} of {max} seats taken; adding {adding} exceeds the maximum of {max}.",
                    pod.id,
                    max = pod.capacity
                ),
            ));
        }
    }

    fn check_slot_duplicates(
        &self,
        pod: &Pod,
        time: SlotTime,
        request: &BookingRequest,
        store: &BookingStore,
        violations: &mut Vec<Violation>,
        duplicate_attempts: &mut u64,
    ) {
        let same_slot = store.find(&pod.id, time);
        for id in &request.students {
            if same_slot.is_some_and(|b| b.contains_student(id)) {
                violations.push(Violation::new(
                    ViolationKind::IntraSlotDuplicate,
                    "students",
                    format!("{id} is already booked in {} at {time}.", pod.id),
                ));
                *duplicate_attempts += 1;
            }
            if let Some(other) = store
                .bookings()
                .iter()
                .find(|b| b.pod_id != pod.id && b.time == time && b.contains_student(id))
            {
                violations.push(Violation::new(
                    ViolationKind::CrossPodClash,
                    "students",
                    format!(
                        "{id} is already booked in {} at {time} and cannot be in two pods at once.",
                        other.pod_id
                    ),
                ));
                *duplicate_attempts += 1;
            }
        }
    }
}

/// First ID that appears twice in the request, if any. IDs are already
/// upper-cased so plain equality is the case-insensitive comparison.
fn first_in_request_duplicate(students: &[String]) -> Option<&str> {
    for (i, id) in students.iter().enumerate() {
        if students[..i].iter().any(|earlier| earlier == id) {
            return Some(id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slot(s: &str) -> SlotTime {
        s.parse().unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn engine_parts() -> (PodCatalog, HoursConfig) {
        (PodCatalog::default(), HoursConfig::default())
    }

    #[test]
    fn valid_request_passes() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let store = BookingStore::new();

        let report = engine.validate(
            &BookingRequest::new("POD-A", "09:00", ids(&["SIT-001"])),
            &store,
        );
        assert!(report.is_valid());
        assert_eq!(report.duplicate_attempts, 0);
    }

    #[test]
    fn missing_everything_collects_all_violations() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let store = BookingStore::new();

        let report = engine.validate(&BookingRequest::new("", "", vec![]), &store);
        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::MissingField,
                ViolationKind::MissingField,
                ViolationKind::EmptyRoster
            ]
        );
    }

    #[test]
    fn unknown_pod_is_missing_field() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let report = engine.validate(
            &BookingRequest::new("POD-Z", "09:00", ids(&["A"])),
            &BookingStore::new(),
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::MissingField);
    }

    #[test]
    fn out_of_hours_and_malformed_times_rejected() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let store = BookingStore::new();

        for time in ["07:59", "20:00", "23:30", "8am", "9:00", "not-a-time"] {
            let report = engine.validate(&BookingRequest::new("POD-A", time, ids(&["A"])), &store);
            assert!(
                report
                    .violations
                    .iter()
                    .any(|v| v.kind == ViolationKind::MalformedTime),
                "expected MalformedTime for {time}"
            );
        }
    }

    #[test]
    fn capacity_message_reports_counts() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let mut store = BookingStore::new();
        store.merge_or_insert("POD-A", slot("09:00"), &ids(&["S1", "S2", "S3", "S4"]));

        let report = engine.validate(
            &BookingRequest::new("POD-A", "09:00", ids(&["S5"])),
            &store,
        );
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.kind, ViolationKind::CapacityExceeded);
        assert!(v.message.contains("4 of 4 seats"));
        assert!(v.message.contains("adding 1"));
        assert!(v.message.contains("maximum of 4"));
        assert_eq!(report.duplicate_attempts, 0);
    }

    #[test]
    fn intra_slot_duplicate_counts_one_attempt() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let mut store = BookingStore::new();
        store.merge_or_insert("POD-A", slot("09:00"), &ids(&["SIT-001"]));

        let report = engine.validate(
            &BookingRequest::new("POD-A", "09:00", ids(&["SIT-001"])),
            &store,
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::IntraSlotDuplicate);
        assert_eq!(report.duplicate_attempts, 1);
    }

    #[test]
    fn cross_pod_clash_same_time_only() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let mut store = BookingStore::new();
        store.merge_or_insert("POD-A", slot("10:00"), &ids(&["SIT-001"]));

        let clash = engine.validate(
            &BookingRequest::new("POD-B", "10:00", ids(&["SIT-001"])),
            &store,
        );
        assert_eq!(clash.violations.len(), 1);
        assert_eq!(clash.violations[0].kind, ViolationKind::CrossPodClash);
        assert_eq!(clash.duplicate_attempts, 1);

        let other_time = engine.validate(
            &BookingRequest::new("POD-B", "11:00", ids(&["SIT-001"])),
            &store,
        );
        assert!(other_time.is_valid());
    }

    #[test]
    fn unrelated_pods_can_share_a_time() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let mut store = BookingStore::new();
        store.merge_or_insert("POD-A", slot("10:00"), &ids(&["SIT-001"]));

        let report = engine.validate(
            &BookingRequest::new("POD-B", "10:00", ids(&["SIT-002"])),
            &store,
        );
        assert!(report.is_valid());
    }

    #[test]
    fn in_request_duplicate_short_circuits() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let store = BookingStore::new();

        // Pod and time are also bad, but the in-request duplicate wins and
        // nothing is counted as a duplicate attempt.
        let report = engine.validate(
            &BookingRequest::new("", "nope", ids(&["SIT-1", "B", "SIT-1"])),
            &store,
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InRequestDuplicate);
        assert!(report.violations[0].message.contains("SIT-1"));
        assert_eq!(report.duplicate_attempts, 0);
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let (catalog, hours) = engine_parts();
        let engine = RuleEngine::new(&catalog, &hours);
        let mut store = BookingStore::new();
        store.merge_or_insert("POD-A", slot("09:00"), &ids(&["S1", "S2", "S3"]));
        store.merge_or_insert("POD-B", slot("09:00"), &ids(&["S9"]));

        // Exceeds capacity, repeats S1 in-slot, and clashes with S9 in POD-B.
        let report = engine.validate(
            &BookingRequest::new("POD-A", "09:00", ids(&["S1", "S9"])),
            &store,
        );
        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationKind::CapacityExceeded));
        assert!(kinds.contains(&ViolationKind::IntraSlotDuplicate));
        assert!(kinds.contains(&ViolationKind::CrossPodClash));
        assert_eq!(report.duplicate_attempts, 2);
    }

    proptest! {
        #[test]
        fn operating_hours_predicate_matches_window(hour in 0u32..24, minute in 0u32..60) {
            let (catalog, hours) = engine_parts();
            let engine = RuleEngine::new(&catalog, &hours);
            let time = format!("{hour:02}:{minute:02}");
            prop_assert_eq!(
                engine.is_within_operating_hours(&time),
                (8..20).contains(&hour)
            );
        }

        #[test]
        fn garbage_times_are_never_in_hours(raw in "[a-z0-9:]{0,8}") {
            let (catalog, hours) = engine_parts();
            let engine = RuleEngine::new(&catalog, &hours);
            if raw.parse::<SlotTime>().is_err() {
                prop_assert!(!engine.is_within_operating_hours(&raw));
            }
        }
    }
}
