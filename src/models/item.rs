//! Scheduled item model.
//!
//! A scheduled item is a named, dated unit of work. Each item carries its own
//! queue of participant links ordered by participant id.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Date;
use crate::queue::{ElementBehavior, PriorityQueue};

/// Reference to a registered participant, by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantLink {
    /// Participant id.
    pub participant_id: i32,
}

impl ParticipantLink {
    /// Creates a link to `participant_id`.
    pub fn new(participant_id: i32) -> Self {
        Self { participant_id }
    }
}

/// Links ordered by ascending participant id.
#[derive(Debug)]
pub struct LinkBehavior;

impl ElementBehavior for LinkBehavior {
    type Element = ParticipantLink;
    type Priority = i32;

    fn same_element(a: &ParticipantLink, b: &ParticipantLink) -> bool {
        a.participant_id == b.participant_id
    }

    /// Lower id sorts first.
    fn compare_priorities(a: &i32, b: &i32) -> Ordering {
        b.cmp(a)
    }
}

/// Queue of participant links held by one item.
pub type LinkQueue = PriorityQueue<LinkBehavior>;

/// A named, dated, uniquely identified unit of work.
#[derive(Debug, Clone)]
pub struct ScheduledItem {
    /// Unique non-negative identifier.
    pub id: i32,
    /// Display name. Unique per date.
    pub name: String,
    /// Date the item is scheduled on.
    pub date: Date,
    links: LinkQueue,
}

impl ScheduledItem {
    /// Creates an item with no linked participants.
    pub fn new(id: i32, name: impl Into<String>, date: Date) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            links: LinkQueue::new(),
        }
    }

    /// Probe value for identity lookups (only `id` is compared).
    pub(crate) fn probe(id: i32) -> Self {
        Self::new(id, String::new(), Date::default())
    }

    /// Linked participant ids, ascending.
    pub fn participant_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.links.elements().map(|l| l.participant_id)
    }

    /// Whether `participant_id` is linked.
    pub fn is_linked(&self, participant_id: i32) -> bool {
        self.links.contains(&ParticipantLink::new(participant_id))
    }

    /// Number of linked participants.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// The nested link queue.
    pub fn links(&self) -> &LinkQueue {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut LinkQueue {
        &mut self.links
    }
}

/// Items ordered by date, earliest first.
///
/// Ties on date fall back to the queue's insertion order.
#[derive(Debug)]
pub struct ItemBehavior;

impl ElementBehavior for ItemBehavior {
    type Element = ScheduledItem;
    type Priority = Date;

    fn same_element(a: &ScheduledItem, b: &ScheduledItem) -> bool {
        a.id == b.id
    }

    fn compare_priorities(a: &Date, b: &Date) -> Ordering {
        b.cmp(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> Date {
        Date::new(day, 1, 2024).unwrap()
    }

    #[test]
    fn test_link_order_by_id() {
        let mut item = ScheduledItem::new(1, "review", date(3));
        for id in [7, 2, 9, 4] {
            item.links_mut()
                .insert(&ParticipantLink::new(id), &id)
                .unwrap();
        }
        let ids: Vec<i32> = item.participant_ids().collect();
        assert_eq!(ids, vec![2, 4, 7, 9]);
        assert!(item.is_linked(9));
        assert!(!item.is_linked(3));
        assert_eq!(item.link_count(), 4);
    }

    #[test]
    fn test_items_by_date() {
        let mut q = PriorityQueue::<ItemBehavior>::new();
        q.insert(&ScheduledItem::new(1, "late", date(20)), &date(20))
            .unwrap();
        q.insert(&ScheduledItem::new(2, "early", date(2)), &date(2))
            .unwrap();
        q.insert(&ScheduledItem::new(3, "early-too", date(2)), &date(2))
            .unwrap();

        let names: Vec<&str> = q.elements().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["early", "early-too", "late"]);
    }

    #[test]
    fn test_item_identity_is_id() {
        let a = ScheduledItem::new(5, "a", date(1));
        let b = ScheduledItem::new(5, "b", date(9));
        assert!(ItemBehavior::same_element(&a, &b));
        assert!(ItemBehavior::same_element(&a, &ScheduledItem::probe(5)));
        assert!(!ItemBehavior::same_element(&a, &ScheduledItem::probe(6)));
    }

    #[test]
    fn test_cloned_item_has_independent_links() {
        let mut item = ScheduledItem::new(1, "x", date(1));
        item.links_mut()
            .insert(&ParticipantLink::new(1), &1)
            .unwrap();
        let copy = item.clone();
        item.links_mut()
            .remove_matching(&ParticipantLink::new(1))
            .unwrap();
        assert_eq!(copy.link_count(), 1);
        assert_eq!(item.link_count(), 0);
    }
}
