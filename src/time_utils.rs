// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::Serializer;

/// Format a UTC timestamp as ISO-8601 with milliseconds and a `Z` suffix.
pub fn format_iso8601(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for [`format_iso8601`].
pub fn serialize_iso8601<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_iso8601(*date))
}

/// Human-readable event time, e.g. "March 01, 2026 at 7:30 PM".
pub fn format_event_date<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz)
        .format("%B %d, %Y at %-I:%M %p")
        .to_string()
}
