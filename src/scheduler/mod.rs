//! Event scheduling engine.
//!
//! `EventScheduler` owns the items and participants queues and keeps their
//! denormalized state in step: linking, unlinking, removing and expiring
//! items all cascade into participant workloads.
//!
//! # Date Policy
//!
//! Items may not be placed before the current date. Whether the current
//! date itself is accepted is controlled by
//! [`SchedulerConfig::allow_current_date`] (accepted by default).

mod config;
mod engine;

pub use config::SchedulerConfig;
pub use engine::EventScheduler;
