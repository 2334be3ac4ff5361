// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home view: event list with the user's booked state.

use super::BookingAction;
use crate::error::ClientError;
use crate::models::{BookedSet, Event};
use crate::routes::Route;
use crate::session::SessionStore;
use crate::time_utils::format_event_date;
use chrono::{Local, TimeZone};
use std::sync::Arc;

pub const FETCH_EVENTS_FAILED: &str = "Failed to fetch events";
pub const NO_EVENTS: &str = "No events available";

/// One rendered event card.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub when: String,
    pub price: String,
    pub action: BookingAction,
    pub link: Route,
}

pub struct HomeView {
    session: Arc<SessionStore>,
    loading: bool,
    error: Option<String>,
    events: Vec<Event>,
    booked: BookedSet,
}

impl HomeView {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            loading: true,
            error: None,
            events: Vec::new(),
            booked: BookedSet::default(),
        }
    }

    /// Fetch events and the user's bookings together.
    ///
    /// Both requests must succeed before the booked set is computed.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.fetch().await {
            Ok((events, bookings)) => {
                self.booked = BookedSet::from_bookings(&bookings);
                tracing::debug!(
                    events = events.len(),
                    booked = self.booked.len(),
                    "Home loaded"
                );
                self.events = events;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load events");
                self.error = Some(FETCH_EVENTS_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    async fn fetch(&self) -> Result<(Vec<Event>, Vec<crate::models::Booking>), ClientError> {
        let credential = self.session.require_credential()?;
        let backend = self.session.backend();
        tokio::try_join!(
            backend.list_events(&credential),
            backend.list_user_bookings(&credential)
        )
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn booked(&self) -> &BookedSet {
        &self.booked
    }

    pub fn is_booked(&self, event_id: &str) -> bool {
        self.booked.contains(event_id)
    }

    /// Whether to show the "+ Add New Event" link.
    pub fn show_add_event(&self) -> bool {
        self.session.is_admin()
    }

    /// Placeholder text when there is nothing to list.
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.error.is_none() && self.events.is_empty()).then_some(NO_EVENTS)
    }

    /// Cards in server order, dates in the local time zone.
    pub fn cards(&self) -> Vec<EventCard> {
        self.cards_in(&Local)
    }

    pub fn cards_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<EventCard>
    where
        Tz::Offset: std::fmt::Display,
    {
        self.events
            .iter()
            .map(|event| EventCard {
                id: event.id.clone(),
                title: event.title.clone(),
                description: event.description.clone(),
                when: format_event_date(event.date, tz),
                price: event.price_label(),
                action: if self.is_booked(&event.id) {
                    BookingAction::Booked
                } else {
                    BookingAction::BookNow
                },
                link: Route::EventDetail(event.id.clone()),
            })
            .collect()
    }
}
