//! Structured error types for the event registry.
//!
//! One variant per observable failure, each carrying the offending ids or
//! dates so the embedding layer can log or surface them without parsing
//! message strings.
//!
//! | Variant | Produced by |
//! |---|---|
//! | `DateOutOfRange` | `add_event`, `change_event_date` |
//! | `NegativeOffset` | `add_event_in` |
//! | `NonPositiveDays` | `advance_time` |
//! | `InvalidEventId` / `InvalidMemberId` | every operation taking an id |
//! | `DuplicateEvent` | `add_event`, `add_event_in`, `change_event_date` |
//! | `DuplicateEventId` / `DuplicateMemberId` | `add_event`, `add_event_in` / `add_member` |
//! | `EventNotFound` | `remove_event` |
//! | `UnknownEventId` / `UnknownMemberId` | reschedule and roster operations |
//! | `AlreadyAttached` / `NotAttached` | `add_member_to_event` / `remove_member_from_event` |

use thiserror::Error;

use crate::date::Date;

/// Failure returned by every fallible [`EventRegistry`] operation.
///
/// Every failure is a precondition violation: nothing is retried
/// internally, and a returned error guarantees the registry is exactly as
/// it was before the call.
///
/// [`EventRegistry`]: super::EventRegistry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The date lies after the registry's current day — events live in the
    /// past or present; the clock advances over them.
    #[error("date {date} is after the registry's current day {today}")]
    DateOutOfRange { date: Date, today: Date },

    /// `add_event_in` was given a negative day offset.
    #[error("negative day offset {0}")]
    NegativeOffset(i32),

    /// `advance_time` must move the clock by at least one day.
    #[error("day count must be positive, got {0}")]
    NonPositiveDays(i32),

    /// Event ids are non-negative.
    #[error("negative event id {0}")]
    InvalidEventId(i32),

    /// Member ids are non-negative.
    #[error("negative member id {0}")]
    InvalidMemberId(i32),

    /// Another live event already occupies this name/date pair.
    #[error("an event named '{name}' is already scheduled on {date}")]
    DuplicateEvent { name: String, date: Date },

    /// The event id is already taken by a live event.
    #[error("event id {0} is already in use")]
    DuplicateEventId(i32),

    /// The member id is already registered.
    #[error("member id {0} is already registered")]
    DuplicateMemberId(i32),

    /// `remove_event` found no live event under this id.
    #[error("no event with id {0} to remove")]
    EventNotFound(i32),

    /// A lookup (reschedule or roster operation) found no event under this
    /// id.
    #[error("no event with id {0}")]
    UnknownEventId(i32),

    /// No member is registered under this id.
    #[error("no member with id {0}")]
    UnknownMemberId(i32),

    /// The member is already on this event's roster.
    #[error("member {member} is already attached to event {event}")]
    AlreadyAttached { member: i32, event: i32 },

    /// The member is not on this event's roster.
    #[error("member {member} is not attached to event {event}")]
    NotAttached { member: i32, event: i32 },
}
