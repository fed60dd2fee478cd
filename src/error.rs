//! Scheduler error types.
//!
//! Every failure carries enough context to tell which object was being
//! looked up. [`SchedulerError::kind`] collapses the variants into the
//! coarse [`ErrorKind`] taxonomy for callers that only branch on category.

use thiserror::Error;

use crate::models::Date;
use crate::queue::QueueError;

/// Result type alias using [`SchedulerError`].
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors returned by [`EventScheduler`](crate::scheduler::EventScheduler) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A required argument was missing (empty name).
    #[error("required argument is missing")]
    NullArgument,

    /// The date precedes the scheduler's current date.
    #[error("date {date} is invalid relative to current date {current}")]
    InvalidDate { date: Date, current: Date },

    /// A day count was out of range.
    #[error("invalid day count: {0}")]
    InvalidDays(i64),

    /// Item id is negative.
    #[error("invalid item id: {0}")]
    InvalidItemId(i32),

    /// Participant id is negative.
    #[error("invalid participant id: {0}")]
    InvalidParticipantId(i32),

    /// An item with the same name already exists on that date.
    #[error("item '{name}' already exists on {date}")]
    ItemAlreadyExists { name: String, date: Date },

    /// An item with the same id already exists.
    #[error("item id {0} already exists")]
    ItemIdAlreadyExists(i32),

    /// A participant with the same id is already registered.
    #[error("participant id {0} already exists")]
    ParticipantIdAlreadyExists(i32),

    /// The participant is already linked to the item.
    #[error("participant {participant_id} is already linked to item {item_id}")]
    ParticipantAlreadyLinked { participant_id: i32, item_id: i32 },

    /// No item has this id.
    #[error("item {0} not found")]
    ItemNotFound(i32),

    /// No participant has this id.
    #[error("participant {0} not found")]
    ParticipantNotFound(i32),

    /// The participant is not linked to the item.
    #[error("participant {participant_id} is not linked to item {item_id}")]
    ParticipantNotLinked { participant_id: i32, item_id: i32 },

    /// Allocation failed while copying into a queue.
    #[error("out of memory")]
    OutOfMemory,
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was absent.
    NullArgument,
    /// A negative id.
    InvalidId,
    /// A date before the current date, or a bad day count.
    InvalidDate,
    /// Duplicate name+date, duplicate id, or duplicate link.
    AlreadyExists,
    /// Unknown id or link.
    NotFound,
    /// Allocation failure.
    OutOfMemory,
}

impl SchedulerError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullArgument => ErrorKind::NullArgument,
            Self::InvalidItemId(_) | Self::InvalidParticipantId(_) => ErrorKind::InvalidId,
            Self::InvalidDate { .. } | Self::InvalidDays(_) => ErrorKind::InvalidDate,
            Self::ItemAlreadyExists { .. }
            | Self::ItemIdAlreadyExists(_)
            | Self::ParticipantIdAlreadyExists(_)
            | Self::ParticipantAlreadyLinked { .. } => ErrorKind::AlreadyExists,
            Self::ItemNotFound(_)
            | Self::ParticipantNotFound(_)
            | Self::ParticipantNotLinked { .. } => ErrorKind::NotFound,
            Self::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }

    /// Maps a queue error raised while operating on an item.
    pub(crate) fn from_item_queue(err: QueueError, item_id: i32) -> Self {
        match err {
            QueueError::OutOfMemory => Self::OutOfMemory,
            QueueError::Empty | QueueError::NotFound | QueueError::CursorUndefined => {
                Self::ItemNotFound(item_id)
            }
        }
    }

    /// Maps a queue error raised while operating on a participant.
    pub(crate) fn from_participant_queue(err: QueueError, participant_id: i32) -> Self {
        match err {
            QueueError::OutOfMemory => Self::OutOfMemory,
            QueueError::Empty | QueueError::NotFound | QueueError::CursorUndefined => {
                Self::ParticipantNotFound(participant_id)
            }
        }
    }

    /// Maps a queue error raised while operating on an item's link queue.
    pub(crate) fn from_link_queue(err: QueueError, participant_id: i32, item_id: i32) -> Self {
        match err {
            QueueError::OutOfMemory => Self::OutOfMemory,
            QueueError::Empty | QueueError::NotFound | QueueError::CursorUndefined => {
                Self::ParticipantNotLinked {
                    participant_id,
                    item_id,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let d = Date::new(1, 1, 2024).unwrap();
        assert_eq!(SchedulerError::NullArgument.kind(), ErrorKind::NullArgument);
        assert_eq!(SchedulerError::InvalidItemId(-1).kind(), ErrorKind::InvalidId);
        assert_eq!(
            SchedulerError::InvalidDate { date: d, current: d }.kind(),
            ErrorKind::InvalidDate
        );
        assert_eq!(
            SchedulerError::ParticipantAlreadyLinked {
                participant_id: 1,
                item_id: 2
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(SchedulerError::ParticipantNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(SchedulerError::OutOfMemory.kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn test_queue_error_translation() {
        assert_eq!(
            SchedulerError::from_item_queue(QueueError::NotFound, 4),
            SchedulerError::ItemNotFound(4)
        );
        assert_eq!(
            SchedulerError::from_participant_queue(QueueError::OutOfMemory, 4),
            SchedulerError::OutOfMemory
        );
        assert_eq!(
            SchedulerError::from_link_queue(QueueError::NotFound, 1, 2),
            SchedulerError::ParticipantNotLinked {
                participant_id: 1,
                item_id: 2
            }
        );
    }

    #[test]
    fn test_error_messages() {
        let d = Date::new(3, 4, 2024).unwrap();
        let err = SchedulerError::ItemAlreadyExists {
            name: "standup".into(),
            date: d,
        };
        assert_eq!(err.to_string(), "item 'standup' already exists on 3.4.2024");
    }
}
