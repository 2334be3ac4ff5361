// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event model for the API.

use chrono::{DateTime, Utc};
use super::ids::{MissingId, WireId};
use serde::{Deserialize, Serialize};

/// Bookable event (server-owned, cached read-only by views).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEvent")]
pub struct Event {
    /// Event ID
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Start time
    pub date: DateTime<Utc>,
    /// Ticket price; absent or zero means free
    pub price: Option<f64>,
}

#[derive(Deserialize)]
struct WireEvent {
    #[serde(flatten)]
    id: WireId,
    title: String,
    #[serde(default)]
    description: String,
    date: DateTime<Utc>,
    #[serde(default)]
    price: Option<f64>,
}

impl TryFrom<WireEvent> for Event {
    type Error = MissingId;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.resolve()?,
            title: wire.title,
            description: wire.description,
            date: wire.date,
            price: wire.price,
        })
    }
}

impl Event {
    /// Price as shown on event cards.
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) if price > 0.0 => format!("${:.2}", price),
            _ => "Free".to_string(),
        }
    }
}

/// Body of `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    #[serde(serialize_with = "crate::time_utils::serialize_iso8601")]
    pub date: DateTime<Utc>,
    pub price: f64,
}
