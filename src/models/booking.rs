// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking model and the booked-event projection.

use super::ids::{MissingId, WireId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Booking lifecycle state. Only the server moves a booking between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Booked,
    Completed,
    Canceled,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "Booked",
            BookingStatus::Completed => "Completed",
            BookingStatus::Canceled => "Canceled",
            BookingStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event embedded in a booking. The server may populate only the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEventRef")]
pub struct EventRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// A user's booking of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireBooking")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub event: EventRef,
    pub status: BookingStatus,
}

#[derive(Deserialize)]
struct WireEventRef {
    #[serde(flatten)]
    id: WireId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl TryFrom<WireEventRef> for EventRef {
    type Error = MissingId;

    fn try_from(wire: WireEventRef) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.resolve()?,
            title: wire.title,
            date: wire.date,
        })
    }
}

#[derive(Deserialize)]
struct WireBooking {
    #[serde(flatten)]
    id: WireId,
    event: EventRef,
    status: BookingStatus,
}

impl TryFrom<WireBooking> for Booking {
    type Error = MissingId;

    fn try_from(wire: WireBooking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.resolve()?,
            event: wire.event,
            status: wire.status,
        })
    }
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking<'a> {
    #[serde(rename = "eventId")]
    pub event_id: &'a str,
}

/// Set of event IDs the user holds a booking for.
///
/// Every booking counts regardless of status, matching what the server
/// reports in the user's booking list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedSet(HashSet<String>);

impl BookedSet {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        Self(bookings.iter().map(|b| b.event.id.clone()).collect())
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.0.contains(event_id)
    }

    pub fn insert(&mut self, event_id: impl Into<String>) -> bool {
        self.0.insert(event_id.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
