//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an [`EventScheduler`](super::EventScheduler).
///
/// # Examples
///
/// ```
/// use u_agenda::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_allow_current_date(false)
///     .with_separator(';');
/// assert_eq!(config.separator, ';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Whether an item may be placed on the current date itself.
    ///
    /// When `false`, only strictly later dates are accepted.
    pub allow_current_date: bool,

    /// Field separator used by the report writers.
    pub separator: char,

    /// Whether the workload report lists participants with zero workload.
    pub include_idle_participants: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            allow_current_date: true,
            separator: ',',
            include_idle_participants: false,
        }
    }
}

impl SchedulerConfig {
    pub fn with_allow_current_date(mut self, allow: bool) -> Self {
        self.allow_current_date = allow;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_idle_participants(mut self, include: bool) -> Self {
        self.include_idle_participants = include;
        self
    }
}
