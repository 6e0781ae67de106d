//! Event and member registry over a date-ordered priority index.
//!
//! [`EventRegistry`] owns the authoritative record of every live event and
//! every registered member, advances a simulated clock, and answers
//! "earliest upcoming event" in O(1) through a [`PriorityQueue`] index.
//!
//! | Topic | Choice |
//! |---|---|
//! | Event storage | one authoritative `BTreeMap` keyed by event id |
//! | Date-ordered access | index of event ids, priority `Reverse<(Date, registration)>` |
//! | Report tie-breaks | registration stamp inside the index priority — survives reschedules |
//! | Iteration order | deterministic everywhere (`BTreeMap` + stamped index) |
//! | Failure contract | validation precedes mutation; an `Err` leaves the registry untouched |
//!
//! Rosters live on the authoritative event record; the index carries only
//! the id, so the two structures can never disagree about membership.
//!
//! # Example
//! ```rust
//! use datebook::date::Date;
//! use datebook::registry::EventRegistry;
//!
//! let mut registry = EventRegistry::new(Date::new(10, 1, 2024)?);
//! registry.add_event("standup", Date::new(5, 1, 2024)?, 1)?;
//! registry.add_member("ada", 7)?;
//! registry.add_member_to_event(7, 1)?;
//! assert_eq!(registry.next_event_name(), Some("standup"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod report;

pub use error::RegistryError;

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::date::Date;
use crate::queue::PriorityQueue;

// ── Index key ─────────────────────────────────────────────────────────────────

/// Priority of one index slot: earliest date first, ties broken by
/// ascending registration order.
type SlotKey = Reverse<(Date, u64)>;

fn slot_key(date: Date, registration: u64) -> SlotKey {
    Reverse((date, registration))
}

// ── Records ───────────────────────────────────────────────────────────────────

/// Authoritative record of one live event.
#[derive(Debug, Clone)]
struct Event {
    name: String,
    date: Date,
    /// Member ids attached to this event.  `BTreeSet` keeps the attendee
    /// report in ascending member-id order for free.
    roster: BTreeSet<i32>,
    /// Creation sequence number; report tie-break among equal dates.
    registration: u64,
}

/// Record of one registered member.  Members are never removed; only their
/// event count changes.
#[derive(Debug, Clone)]
struct Member {
    name: String,
    /// Number of live events this member is attached to.  Mutated only by
    /// attach/detach and by event removal or expiry.
    event_count: u32,
    registration: u64,
}

// ── Report rows ───────────────────────────────────────────────────────────────

/// One event in date order: name, date, attendee names in ascending
/// member-id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry {
    pub name: String,
    pub date: Date,
    pub attendees: Vec<String>,
}

/// One member with at least one live event, grouped by descending event
/// count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLoad {
    pub name: String,
    pub event_count: u32,
}

// ── EventRegistry ─────────────────────────────────────────────────────────────

/// The scheduling registry: events, members and the simulated clock.
///
/// Single-threaded by contract — no interior mutability, no locking.  A
/// multi-threaded embedder serialises access with one lock per registry.
#[derive(Debug)]
pub struct EventRegistry {
    /// The current simulated day.  Monotonically non-decreasing; moves only
    /// through [`advance_time`](Self::advance_time).
    today: Date,
    events: BTreeMap<i32, Event>,
    members: BTreeMap<i32, Member>,
    /// Date-ordered view over `events`, holding ids only.
    schedule: PriorityQueue<i32, SlotKey>,
    next_event_registration: u64,
    next_member_registration: u64,
}

impl EventRegistry {
    /// Create an empty registry whose clock starts at `today`.
    pub fn new(today: Date) -> Self {
        info!(%today, "event registry created");
        Self {
            today,
            events: BTreeMap::new(),
            members: BTreeMap::new(),
            schedule: PriorityQueue::new(),
            next_event_registration: 0,
            next_member_registration: 0,
        }
    }

    /// The registry's current simulated day.
    pub fn today(&self) -> Date {
        self.today
    }

    // ── Event lifecycle ───────────────────────────────────────────────────────

    /// Schedule an event on an explicit date.
    ///
    /// The date must not lie after [`today`](Self::today): events are
    /// created in the past or present, and the clock then advances over
    /// them.
    pub fn add_event(&mut self, name: &str, date: Date, id: i32) -> Result<(), RegistryError> {
        if date > self.today {
            return Err(RegistryError::DateOutOfRange {
                date,
                today: self.today,
            });
        }
        self.insert_event(name, date, id)
    }

    /// Schedule an event `days_ahead` days after the current day.
    ///
    /// The offset form is exempt from the watermark check — its only date
    /// validation is the sign of the offset.  Offset events are the ones a
    /// later [`advance_time`](Self::advance_time) expires.
    pub fn add_event_in(&mut self, name: &str, days_ahead: i32, id: i32) -> Result<(), RegistryError> {
        if days_ahead < 0 {
            return Err(RegistryError::NegativeOffset(days_ahead));
        }
        let date = self.today.advanced_by(days_ahead as u32);
        self.insert_event(name, date, id)
    }

    /// Shared tail of both add forms: id and collision checks, then the
    /// twin insert.
    fn insert_event(&mut self, name: &str, date: Date, id: i32) -> Result<(), RegistryError> {
        if id < 0 {
            return Err(RegistryError::InvalidEventId(id));
        }
        if self
            .events
            .values()
            .any(|event| event.name == name && event.date == date)
        {
            return Err(RegistryError::DuplicateEvent {
                name: name.to_string(),
                date,
            });
        }
        if self.events.contains_key(&id) {
            return Err(RegistryError::DuplicateEventId(id));
        }

        let registration = self.next_event_registration;
        self.next_event_registration += 1;
        self.events.insert(
            id,
            Event {
                name: name.to_string(),
                date,
                roster: BTreeSet::new(),
                registration,
            },
        );
        self.schedule.insert(id, slot_key(date, registration));
        debug!(event = name, %date, id, "event scheduled");
        Ok(())
    }

    /// Remove a live event, releasing every roster member's hold on it.
    pub fn remove_event(&mut self, id: i32) -> Result<(), RegistryError> {
        if id < 0 {
            return Err(RegistryError::InvalidEventId(id));
        }
        if !self.events.contains_key(&id) {
            return Err(RegistryError::EventNotFound(id));
        }
        self.discard_event(id);
        Ok(())
    }

    /// Move a live event to a new date, keeping its roster and its
    /// registration order untouched.
    pub fn change_event_date(&mut self, id: i32, new_date: Date) -> Result<(), RegistryError> {
        if new_date > self.today {
            return Err(RegistryError::DateOutOfRange {
                date: new_date,
                today: self.today,
            });
        }
        if id < 0 {
            return Err(RegistryError::InvalidEventId(id));
        }
        let (name, old_date, registration) = match self.events.get(&id) {
            Some(event) => (event.name.clone(), event.date, event.registration),
            None => return Err(RegistryError::UnknownEventId(id)),
        };
        // Only *other* events conflict; rescheduling onto its own date is
        // a no-op move, not a collision.
        if self
            .events
            .iter()
            .any(|(&other, event)| other != id && event.name == name && event.date == new_date)
        {
            return Err(RegistryError::DuplicateEvent {
                name,
                date: new_date,
            });
        }

        let relocated = self.schedule.change_priority(
            id,
            &slot_key(old_date, registration),
            slot_key(new_date, registration),
        );
        debug_assert!(relocated.is_ok(), "schedule index out of step with event store");
        if let Some(event) = self.events.get_mut(&id) {
            event.date = new_date;
        }
        debug!(id, %old_date, %new_date, "event rescheduled");
        Ok(())
    }

    // ── Members ───────────────────────────────────────────────────────────────

    /// Register a member with no event attachments.
    pub fn add_member(&mut self, name: &str, id: i32) -> Result<(), RegistryError> {
        if id < 0 {
            return Err(RegistryError::InvalidMemberId(id));
        }
        if self.members.contains_key(&id) {
            return Err(RegistryError::DuplicateMemberId(id));
        }
        let registration = self.next_member_registration;
        self.next_member_registration += 1;
        self.members.insert(
            id,
            Member {
                name: name.to_string(),
                event_count: 0,
                registration,
            },
        );
        debug!(member = name, id, "member registered");
        Ok(())
    }

    /// Attach a registered member to a live event's roster.
    pub fn add_member_to_event(&mut self, member_id: i32, event_id: i32) -> Result<(), RegistryError> {
        if event_id < 0 {
            return Err(RegistryError::InvalidEventId(event_id));
        }
        if member_id < 0 {
            return Err(RegistryError::InvalidMemberId(member_id));
        }
        let Some(event) = self.events.get_mut(&event_id) else {
            return Err(RegistryError::UnknownEventId(event_id));
        };
        if !self.members.contains_key(&member_id) {
            return Err(RegistryError::UnknownMemberId(member_id));
        }
        if !event.roster.insert(member_id) {
            return Err(RegistryError::AlreadyAttached {
                member: member_id,
                event: event_id,
            });
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.event_count += 1;
        }
        debug!(member_id, event_id, "member attached");
        Ok(())
    }

    /// Detach a member from a live event's roster.
    pub fn remove_member_from_event(
        &mut self,
        member_id: i32,
        event_id: i32,
    ) -> Result<(), RegistryError> {
        if member_id < 0 {
            return Err(RegistryError::InvalidMemberId(member_id));
        }
        if event_id < 0 {
            return Err(RegistryError::InvalidEventId(event_id));
        }
        if !self.members.contains_key(&member_id) {
            return Err(RegistryError::UnknownMemberId(member_id));
        }
        let Some(event) = self.events.get_mut(&event_id) else {
            return Err(RegistryError::UnknownEventId(event_id));
        };
        if !event.roster.remove(&member_id) {
            return Err(RegistryError::NotAttached {
                member: member_id,
                event: event_id,
            });
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.event_count = member.event_count.saturating_sub(1);
        }
        debug!(member_id, event_id, "member detached");
        Ok(())
    }

    // ── Clock ─────────────────────────────────────────────────────────────────

    /// Advance the clock by `days` single-day steps, then expire every
    /// event dated strictly before the new day — earliest first, each
    /// expiry fully applied (roster holds released) before the next is
    /// examined.
    pub fn advance_time(&mut self, days: i32) -> Result<(), RegistryError> {
        if days <= 0 {
            return Err(RegistryError::NonPositiveDays(days));
        }
        for _ in 0..days {
            self.today.advance();
        }

        let mut expired = 0usize;
        while let Some(&id) = self.schedule.peek_first() {
            let passed = self
                .events
                .get(&id)
                .map_or(false, |event| event.date < self.today);
            if !passed {
                break;
            }
            self.discard_event(id);
            expired += 1;
        }
        info!(today = %self.today, days, expired, "clock advanced");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Number of live events.
    pub fn events_count(&self) -> usize {
        self.events.len()
    }

    /// Name of the earliest-dated live event (lowest registration order
    /// among equal dates), or `None` when no events exist.
    pub fn next_event_name(&self) -> Option<&str> {
        self.schedule
            .peek_first()
            .and_then(|id| self.events.get(id))
            .map(|event| event.name.as_str())
    }

    /// Every live event in ascending date order, ties broken by ascending
    /// registration order; attendee names in ascending member-id order.
    pub fn events_by_date(&self) -> Vec<EventEntry> {
        self.schedule
            .iter()
            .filter_map(|(id, _)| self.events.get(id))
            .map(|event| EventEntry {
                name: event.name.clone(),
                date: event.date,
                attendees: event
                    .roster
                    .iter()
                    .filter_map(|member_id| self.members.get(member_id))
                    .map(|member| member.name.clone())
                    .collect(),
            })
            .collect()
    }

    /// Every member attached to at least one live event, grouped by
    /// descending event count, within a group by ascending registration
    /// order.
    pub fn members_by_load(&self) -> Vec<MemberLoad> {
        let mut loaded: Vec<&Member> = self
            .members
            .values()
            .filter(|member| member.event_count > 0)
            .collect();
        loaded.sort_by_key(|member| (Reverse(member.event_count), member.registration));
        loaded
            .into_iter()
            .map(|member| MemberLoad {
                name: member.name.clone(),
                event_count: member.event_count,
            })
            .collect()
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Drop `id` from both structures and decrement each roster member's
    /// event count, looked up by identity.
    fn discard_event(&mut self, id: i32) {
        let Some(event) = self.events.remove(&id) else {
            return;
        };
        let removed = self.schedule.remove_matching(&id);
        debug_assert!(removed.is_ok(), "schedule index out of step with event store");
        for member_id in &event.roster {
            if let Some(member) = self.members.get_mut(member_id) {
                member.event_count = member.event_count.saturating_sub(1);
            }
        }
        debug!(event = %event.name, id, "event removed");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
