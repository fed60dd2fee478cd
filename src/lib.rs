//! Date-driven event agenda for the U-Engine ecosystem.
//!
//! Provides a generic sorted priority queue and an event scheduler built
//! from three instances of it: scheduled items ordered by date,
//! participants ordered by workload, and per-item participant links
//! ordered by id.
//!
//! # Modules
//!
//! - **`queue`**: `PriorityQueue` and the `ElementBehavior` contract
//! - **`models`**: Domain types — `Date`, `ScheduledItem`, `Participant`,
//!   `ParticipantLink` and their queue behaviors
//! - **`scheduler`**: `EventScheduler` and `SchedulerConfig`
//! - **`report`**: Item and workload records, delimited writers
//! - **`validation`**: Cross-queue consistency audit
//! - **`error`**: `SchedulerError` and the `ErrorKind` taxonomy
//!
//! # Logging
//!
//! Operations emit `tracing` events (`debug` for mutations, `info` for time
//! advance and expiry). Install a subscriber in the host application to
//! see them.

pub mod error;
pub mod models;
pub mod queue;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{ErrorKind, Result, SchedulerError};
pub use models::Date;
pub use queue::{ElementBehavior, PriorityQueue};
pub use scheduler::{EventScheduler, SchedulerConfig};
