//! Participant model.
//!
//! Participants are linked to scheduled items. Each one tracks a workload
//! count: the number of items it is currently linked to. The participants
//! queue is keyed by [`WorkloadKey`] so the busiest participant comes first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::queue::ElementBehavior;

/// An entity that can be linked to scheduled items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique non-negative identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Number of items this participant is linked to.
    pub workload: u32,
}

impl Participant {
    /// Creates a participant with zero workload.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            workload: 0,
        }
    }

    /// Sets the workload count.
    pub fn with_workload(mut self, workload: u32) -> Self {
        self.workload = workload;
        self
    }

    /// Ordering key for the participants queue.
    pub fn key(&self) -> WorkloadKey {
        WorkloadKey::new(self.workload, self.id)
    }

    pub(crate) fn probe(id: i32) -> Self {
        Self::new(id, String::new())
    }
}

/// Participants queue priority: workload, tie-broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadKey {
    /// Workload count.
    pub workload: u32,
    /// Participant id.
    pub id: i32,
}

impl WorkloadKey {
    /// Creates a key.
    pub fn new(workload: u32, id: i32) -> Self {
        Self { workload, id }
    }
}

/// Participants ordered by descending workload, then ascending id.
#[derive(Debug)]
pub struct ParticipantBehavior;

impl ElementBehavior for ParticipantBehavior {
    type Element = Participant;
    type Priority = WorkloadKey;

    fn same_element(a: &Participant, b: &Participant) -> bool {
        a.id == b.id
    }

    fn compare_priorities(a: &WorkloadKey, b: &WorkloadKey) -> Ordering {
        a.workload.cmp(&b.workload).then_with(|| b.id.cmp(&a.id))
    }
}
