//! Consistency checks for scheduler state.
//!
//! Audits the invariants that tie the three queues together. Detects:
//! - Unsorted queues or stale queue keys
//! - Duplicate item or participant IDs
//! - Duplicate item names on one date
//! - Links to unregistered participants
//! - Workload counts that disagree with the links
//! - Items left behind the current date
//!
//! A scheduler driven only through its public API always passes; the check
//! exists for tests and for debugging callers that suspect corruption.

use std::collections::{HashMap, HashSet};

use crate::models::Date;
use crate::scheduler::EventScheduler;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Two items share a name on the same date.
    DuplicateItem,
    /// A queue is out of priority order.
    Unsorted,
    /// A stored queue key disagrees with the element it orders.
    KeyMismatch,
    /// An item links a participant that is not registered.
    DanglingLink,
    /// A participant's workload differs from its link count.
    WorkloadMismatch,
    /// An item is dated before the current date.
    StaleItem,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the cross-queue invariants of a scheduler.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_scheduler(scheduler: &EventScheduler) -> ValidationResult {
    let mut errors = Vec::new();
    let items = &scheduler.items;
    let participants = &scheduler.participants;

    if !items.is_sorted() {
        errors.push(ValidationError::new(
            ValidationErrorKind::Unsorted,
            "Items queue is not in date order",
        ));
    }
    if !participants.is_sorted() {
        errors.push(ValidationError::new(
            ValidationErrorKind::Unsorted,
            "Participants queue is not in workload order",
        ));
    }

    // Participants
    let mut workloads: HashMap<i32, u32> = HashMap::new();
    for (p, key) in participants {
        if workloads.insert(p.id, p.workload).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate participant ID: {}", p.id),
            ));
        }
        if *key != p.key() {
            errors.push(ValidationError::new(
                ValidationErrorKind::KeyMismatch,
                format!(
                    "Participant {} is keyed at workload {} but holds {}",
                    p.id, key.workload, p.workload
                ),
            ));
        }
    }

    // Items and links
    let today = scheduler.current_date();
    let mut item_ids = HashSet::new();
    let mut names_on_date: HashSet<(&str, Date)> = HashSet::new();
    let mut link_counts: HashMap<i32, u32> = HashMap::new();

    for (item, date) in items {
        if !item_ids.insert(item.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id),
            ));
        }
        if !names_on_date.insert((item.name.as_str(), item.date)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateItem,
                format!("Item '{}' appears twice on {}", item.name, item.date),
            ));
        }
        if *date != item.date {
            errors.push(ValidationError::new(
                ValidationErrorKind::KeyMismatch,
                format!("Item {} is keyed at {} but dated {}", item.id, date, item.date),
            ));
        }
        if item.date.is_before(&today) {
            errors.push(ValidationError::new(
                ValidationErrorKind::StaleItem,
                format!("Item {} is dated {} before {}", item.id, item.date, today),
            ));
        }
        if !item.links().is_sorted() {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unsorted,
                format!("Links of item {} are not in id order", item.id),
            ));
        }

        for pid in item.participant_ids() {
            if !workloads.contains_key(&pid) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingLink,
                    format!("Item {} links unknown participant {}", item.id, pid),
                ));
            }
            *link_counts.entry(pid).or_default() += 1;
        }
    }

    for (&pid, &workload) in &workloads {
        let linked = link_counts.get(&pid).copied().unwrap_or(0);
        if workload != linked {
            errors.push(ValidationError::new(
                ValidationErrorKind::WorkloadMismatch,
                format!("Participant {pid} has workload {workload} but {linked} links"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
