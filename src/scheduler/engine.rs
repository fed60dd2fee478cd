//! Event scheduler.
//!
//! Composes three priority queues:
//! - **items**: scheduled items keyed by date (earliest first, ties by insertion)
//! - **participants**: participants keyed by workload (busiest first, ties by id)
//! - **links**: one queue per item holding linked participant ids (ascending)
//!
//! Participant workloads are denormalized: a participant's count equals the
//! number of items whose link queue contains it, and its position in the
//! participants queue follows that count. Every mutating operation first
//! validates all preconditions and computes the resulting workload updates,
//! then applies them, so a rejected call leaves no trace.

use std::io::{self, Write};
use std::path::Path;

use super::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::models::{
    Date, ItemBehavior, Participant, ParticipantBehavior, ParticipantLink, ScheduledItem,
    WorkloadKey,
};
use crate::queue::PriorityQueue;
use crate::report::{self, ItemRecord, WorkloadRecord};

/// A pending re-key of one participant in the participants queue.
#[derive(Debug)]
struct WorkloadUpdate {
    participant: Participant,
    old_key: WorkloadKey,
    new_workload: u32,
}

/// Date-driven scheduler of items and participant workloads.
///
/// # Example
/// ```
/// use u_agenda::models::Date;
/// use u_agenda::scheduler::EventScheduler;
///
/// let today = Date::new(1, 3, 2025).unwrap();
/// let mut agenda = EventScheduler::new(today);
///
/// agenda.add_item_after_days("design review", 2, 10).unwrap();
/// agenda.add_item_on_date("standup", today, 11).unwrap();
/// agenda.register_participant("Ann", 1).unwrap();
/// agenda.link_participant(1, 10).unwrap();
///
/// assert_eq!(agenda.next_item_name(), Some("standup"));
/// assert_eq!(agenda.participant(1).unwrap().workload, 1);
///
/// agenda.advance_time(1).unwrap(); // "standup" expires
/// assert_eq!(agenda.item_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventScheduler {
    pub(crate) current_date: Date,
    pub(crate) items: PriorityQueue<ItemBehavior>,
    pub(crate) participants: PriorityQueue<ParticipantBehavior>,
    pub(crate) config: SchedulerConfig,
}

impl EventScheduler {
    /// Creates an empty scheduler starting at `initial_date`.
    pub fn new(initial_date: Date) -> Self {
        Self::with_config(initial_date, SchedulerConfig::default())
    }

    /// Creates an empty scheduler with an explicit configuration.
    pub fn with_config(initial_date: Date, config: SchedulerConfig) -> Self {
        Self {
            current_date: initial_date,
            items: PriorityQueue::new(),
            participants: PriorityQueue::new(),
            config,
        }
    }

    // ======================== Queries ========================

    /// The scheduler's current date.
    pub fn current_date(&self) -> Date {
        self.current_date
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Number of scheduled items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of registered participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Looks up an item by id.
    pub fn item(&self, id: i32) -> Option<&ScheduledItem> {
        self.items.find(|i| i.id == id)
    }

    /// Looks up a participant by id.
    pub fn participant(&self, id: i32) -> Option<&Participant> {
        self.participants.find(|p| p.id == id)
    }

    /// Items in date order.
    pub fn items(&self) -> impl Iterator<Item = &ScheduledItem> + '_ {
        self.items.elements()
    }

    /// Participants in descending workload order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.participants.elements()
    }

    /// Name of the earliest item (ties by insertion order).
    pub fn next_item_name(&self) -> Option<&str> {
        self.items.first().map(|i| i.name.as_str())
    }

    // ======================== Items ========================

    /// Schedules a new item on `date`.
    ///
    /// # Errors
    /// - `NullArgument` for an empty name
    /// - `InvalidDate` if `date` precedes the current date
    /// - `InvalidItemId` for a negative id
    /// - `ItemAlreadyExists` if an item with this name is already on `date`
    /// - `ItemIdAlreadyExists` if `id` is taken
    pub fn add_item_on_date(&mut self, name: &str, date: Date, id: i32) -> Result<()> {
        if name.is_empty() {
            return Err(SchedulerError::NullArgument);
        }
        self.check_date(date)?;
        if id < 0 {
            return Err(SchedulerError::InvalidItemId(id));
        }
        if self.name_taken_on(name, date, None) {
            return Err(SchedulerError::ItemAlreadyExists {
                name: name.to_string(),
                date,
            });
        }
        if self.items.contains(&ScheduledItem::probe(id)) {
            return Err(SchedulerError::ItemIdAlreadyExists(id));
        }

        let item = ScheduledItem::new(id, name, date);
        self.items
            .insert(&item, &date)
            .map_err(|e| SchedulerError::from_item_queue(e, id))?;

        tracing::debug!(id, name, %date, "item scheduled");
        Ok(())
    }

    /// Schedules a new item `days` days after the current date.
    ///
    /// A negative offset, or one that runs past the last representable
    /// date, is rejected with `InvalidDays`.
    pub fn add_item_after_days(&mut self, name: &str, days: i32, id: i32) -> Result<()> {
        if name.is_empty() {
            return Err(SchedulerError::NullArgument);
        }
        let date = u32::try_from(days)
            .ok()
            .and_then(|offset| self.current_date.plus_days(offset).ok())
            .ok_or(SchedulerError::InvalidDays(days.into()))?;
        self.add_item_on_date(name, date, id)
    }

    /// Removes an item, releasing the workload of every linked participant.
    pub fn remove_item(&mut self, id: i32) -> Result<()> {
        if id < 0 {
            return Err(SchedulerError::InvalidItemId(id));
        }
        let item = self.item(id).ok_or(SchedulerError::ItemNotFound(id))?;
        let linked: Vec<i32> = item.participant_ids().collect();
        let updates = self.plan_workload_updates(&linked, -1)?;

        self.items
            .remove_matching(&ScheduledItem::probe(id))
            .map_err(|e| SchedulerError::from_item_queue(e, id))?;
        self.apply_workload_updates(updates)?;

        tracing::debug!(id, released = linked.len(), "item removed");
        Ok(())
    }

    /// Moves an item to `new_date`.
    ///
    /// The item is re-keyed as if newly inserted on that date, so it sorts
    /// after items already there. Reassigning to the item's own date is a
    /// no-op that keeps its position.
    pub fn reassign_item_date(&mut self, id: i32, new_date: Date) -> Result<()> {
        self.check_date(new_date)?;
        if id < 0 {
            return Err(SchedulerError::InvalidItemId(id));
        }
        let (item, old_date) = self
            .items
            .find_entry(|i| i.id == id)
            .ok_or(SchedulerError::ItemNotFound(id))?;
        let old_date = *old_date;
        let name = item.name.clone();
        if self.name_taken_on(&name, new_date, Some(id)) {
            return Err(SchedulerError::ItemAlreadyExists {
                name,
                date: new_date,
            });
        }

        self.items
            .change_priority(&ScheduledItem::probe(id), &old_date, &new_date)
            .map_err(|e| SchedulerError::from_item_queue(e, id))?;
        if let Some(item) = self.items.find_mut(|i| i.id == id) {
            item.date = new_date;
        }

        tracing::debug!(id, from = %old_date, to = %new_date, "item rescheduled");
        Ok(())
    }

    /// Advances the current date by `days` and removes every item that now
    /// lies in the past, earliest first.
    ///
    /// A non-positive count, or one that runs past the last representable
    /// date, is rejected with `InvalidDays` and changes nothing.
    pub fn advance_time(&mut self, days: i32) -> Result<()> {
        let today = match u32::try_from(days) {
            Ok(n) if n > 0 => self.current_date.plus_days(n).ok(),
            _ => None,
        }
        .ok_or(SchedulerError::InvalidDays(days.into()))?;
        self.current_date = today;
        tracing::info!(days, today = %self.current_date, "time advanced");

        while let Some(item) = self.items.first() {
            if !item.date.is_before(&self.current_date) {
                break;
            }
            let id = item.id;
            tracing::info!(id, name = %item.name, date = %item.date, "item expired");
            self.remove_item(id)?;
        }
        Ok(())
    }

    // ======================== Participants ========================

    /// Registers a participant with zero workload.
    pub fn register_participant(&mut self, name: &str, id: i32) -> Result<()> {
        if name.is_empty() {
            return Err(SchedulerError::NullArgument);
        }
        if id < 0 {
            return Err(SchedulerError::InvalidParticipantId(id));
        }
        if self.participants.contains(&Participant::probe(id)) {
            return Err(SchedulerError::ParticipantIdAlreadyExists(id));
        }

        let participant = Participant::new(id, name);
        self.participants
            .insert(&participant, &participant.key())
            .map_err(|e| SchedulerError::from_participant_queue(e, id))?;

        tracing::debug!(id, name, "participant registered");
        Ok(())
    }

    /// Links a participant to an item and increments its workload.
    pub fn link_participant(&mut self, participant_id: i32, item_id: i32) -> Result<()> {
        self.check_link_ids(participant_id, item_id)?;
        let item = self
            .item(item_id)
            .ok_or(SchedulerError::ItemNotFound(item_id))?;
        if self.participant(participant_id).is_none() {
            return Err(SchedulerError::ParticipantNotFound(participant_id));
        }
        if item.is_linked(participant_id) {
            return Err(SchedulerError::ParticipantAlreadyLinked {
                participant_id,
                item_id,
            });
        }
        let updates = self.plan_workload_updates(&[participant_id], 1)?;

        // Only the link insert can allocate; workloads change after it.
        let Some(item) = self.items.find_mut(|i| i.id == item_id) else {
            return Err(SchedulerError::ItemNotFound(item_id));
        };
        item.links_mut()
            .insert(&ParticipantLink::new(participant_id), &participant_id)
            .map_err(|e| SchedulerError::from_link_queue(e, participant_id, item_id))?;
        self.apply_workload_updates(updates)?;

        tracing::debug!(participant_id, item_id, "participant linked");
        Ok(())
    }

    /// Unlinks a participant from an item and decrements its workload.
    pub fn unlink_participant(&mut self, participant_id: i32, item_id: i32) -> Result<()> {
        self.check_link_ids(participant_id, item_id)?;
        let item = self
            .item(item_id)
            .ok_or(SchedulerError::ItemNotFound(item_id))?;
        if self.participant(participant_id).is_none() {
            return Err(SchedulerError::ParticipantNotFound(participant_id));
        }
        if !item.is_linked(participant_id) {
            return Err(SchedulerError::ParticipantNotLinked {
                participant_id,
                item_id,
            });
        }
        let updates = self.plan_workload_updates(&[participant_id], -1)?;

        let Some(item) = self.items.find_mut(|i| i.id == item_id) else {
            return Err(SchedulerError::ItemNotFound(item_id));
        };
        item.links_mut()
            .remove_matching(&ParticipantLink::new(participant_id))
            .map_err(|e| SchedulerError::from_link_queue(e, participant_id, item_id))?;
        self.apply_workload_updates(updates)?;

        tracing::debug!(participant_id, item_id, "participant unlinked");
        Ok(())
    }

    // ======================== Reports ========================

    /// Item records in date order.
    pub fn item_records(&self) -> Vec<ItemRecord> {
        self.items
            .elements()
            .map(|item| ItemRecord {
                name: item.name.clone(),
                date: item.date,
                participants: item
                    .participant_ids()
                    .filter_map(|pid| self.participant(pid))
                    .map(|p| p.name.clone())
                    .collect(),
            })
            .collect()
    }

    /// Workload records in descending workload order.
    ///
    /// Participants with zero workload are left out unless
    /// [`SchedulerConfig::include_idle_participants`] is set.
    pub fn workload_records(&self) -> Vec<WorkloadRecord> {
        self.participants
            .elements()
            .filter(|p| p.workload > 0 || self.config.include_idle_participants)
            .map(|p| WorkloadRecord {
                name: p.name.clone(),
                workload: p.workload,
            })
            .collect()
    }

    /// Writes the items report to `sink`.
    pub fn export_items<W: Write>(&self, sink: W) -> io::Result<()> {
        report::write_items(&self.item_records(), self.config.separator, sink)
    }

    /// Writes the workloads report to `sink`.
    pub fn export_participant_workloads<W: Write>(&self, sink: W) -> io::Result<()> {
        report::write_workloads(&self.workload_records(), self.config.separator, sink)
    }

    /// Writes the items report to a file. A file that cannot be opened is ignored.
    pub fn export_items_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        report::write_items_to_path(&self.item_records(), self.config.separator, path.as_ref())
    }

    /// Writes the workloads report to a file. A file that cannot be opened is ignored.
    pub fn export_workloads_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        report::write_workloads_to_path(
            &self.workload_records(),
            self.config.separator,
            path.as_ref(),
        )
    }

    // ======================== Internals ========================

    fn check_date(&self, date: Date) -> Result<()> {
        let too_early = if self.config.allow_current_date {
            date.is_before(&self.current_date)
        } else {
            date <= self.current_date
        };
        if too_early {
            return Err(SchedulerError::InvalidDate {
                date,
                current: self.current_date,
            });
        }
        Ok(())
    }

    fn check_link_ids(&self, participant_id: i32, item_id: i32) -> Result<()> {
        if participant_id < 0 {
            return Err(SchedulerError::InvalidParticipantId(participant_id));
        }
        if item_id < 0 {
            return Err(SchedulerError::InvalidItemId(item_id));
        }
        Ok(())
    }

    /// Whether an item other than `except` already uses `name` on `date`.
    fn name_taken_on(&self, name: &str, date: Date, except: Option<i32>) -> bool {
        self.items
            .find(|i| i.date == date && i.name == name && Some(i.id) != except)
            .is_some()
    }

    /// Computes workload changes without touching any queue.
    fn plan_workload_updates(
        &self,
        participant_ids: &[i32],
        delta: i32,
    ) -> Result<Vec<WorkloadUpdate>> {
        participant_ids
            .iter()
            .map(|&pid| -> Result<WorkloadUpdate> {
                let participant = self
                    .participant(pid)
                    .ok_or(SchedulerError::ParticipantNotFound(pid))?;
                let new_workload = participant.workload.saturating_add_signed(delta);
                Ok(WorkloadUpdate {
                    old_key: participant.key(),
                    participant: participant.clone(),
                    new_workload,
                })
            })
            .collect()
    }

    /// Re-keys participants. Never allocates: each move frees a slot first.
    fn apply_workload_updates(&mut self, updates: Vec<WorkloadUpdate>) -> Result<()> {
        for update in updates {
            let id = update.participant.id;
            let new_key = WorkloadKey::new(update.new_workload, id);
            self.participants
                .change_priority(&update.participant, &update.old_key, &new_key)
                .map_err(|e| SchedulerError::from_participant_queue(e, id))?;
            if let Some(p) = self.participants.find_mut(|p| p.id == id) {
                p.workload = update.new_workload;
            }
        }
        Ok(())
    }
}
