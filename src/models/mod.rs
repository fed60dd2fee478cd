//! Agenda domain models.
//!
//! Provides the element types stored in the scheduler's queues together
//! with the behavior contracts that order them.
//!
//! # Queue Mappings
//!
//! | Queue | Element | Priority | First entry |
//! |-------|---------|----------|-------------|
//! | items | `ScheduledItem` | `Date` | earliest date |
//! | participants | `Participant` | `WorkloadKey` | highest workload |
//! | links (per item) | `ParticipantLink` | participant id | lowest id |

mod date;
mod item;
mod participant;

pub use date::{Date, DateError, DAYS_IN_MONTH, MONTHS_IN_YEAR};
pub use item::{ItemBehavior, LinkBehavior, LinkQueue, ParticipantLink, ScheduledItem};
pub use participant::{Participant, ParticipantBehavior, WorkloadKey};
