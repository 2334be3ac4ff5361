// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event detail view with the booking action.

use super::BookingAction;
use crate::error::ClientError;
use crate::models::{BookedSet, Booking, Event};
use crate::session::SessionStore;
use std::sync::Arc;

pub const FETCH_EVENT_FAILED: &str = "Failed to fetch event details";
pub const BOOKING_FAILED: &str = "Failed to book event";
pub const BOOKING_SUCCEEDED: &str = "Event booked successfully!";

pub struct EventDetailView {
    session: Arc<SessionStore>,
    event_id: String,
    loading: bool,
    error: Option<String>,
    event: Option<Event>,
    is_booked: bool,
    booking_in_flight: bool,
    booking_error: Option<String>,
    booking_success: bool,
}

impl EventDetailView {
    pub fn new(session: Arc<SessionStore>, event_id: impl Into<String>) -> Self {
        Self {
            session,
            event_id: event_id.into(),
            loading: true,
            error: None,
            event: None,
            is_booked: false,
            booking_in_flight: false,
            booking_error: None,
            booking_success: false,
        }
    }

    /// Fetch the event and the user's bookings together.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.fetch().await {
            Ok((event, bookings)) => {
                self.is_booked = BookedSet::from_bookings(&bookings).contains(&self.event_id);
                self.event = Some(event);
            }
            Err(err) => {
                tracing::warn!(event_id = %self.event_id, error = %err, "Failed to load event");
                self.error = Some(FETCH_EVENT_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    async fn fetch(&self) -> Result<(Event, Vec<Booking>), ClientError> {
        let credential = self.session.require_credential()?;
        let backend = self.session.backend();
        tokio::try_join!(
            backend.get_event(&credential, &self.event_id),
            backend.list_user_bookings(&credential)
        )
    }

    /// Book the event. Marked booked only once the server acknowledges.
    pub async fn book(&mut self) {
        if self.is_booked || self.booking_in_flight {
            return;
        }

        self.booking_in_flight = true;
        self.booking_error = None;
        self.booking_success = false;

        let result = match self.session.require_credential() {
            Ok(credential) => {
                self.session
                    .backend()
                    .create_booking(&credential, &self.event_id)
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(booking) => {
                tracing::info!(event_id = %self.event_id, booking_id = %booking.id, "Event booked");
                self.is_booked = true;
                self.booking_success = true;
            }
            Err(err) => {
                tracing::warn!(event_id = %self.event_id, error = %err, "Booking failed");
                self.booking_error = Some(err.into_failure(BOOKING_FAILED).message);
            }
        }

        self.booking_in_flight = false;
    }

    /// Hide the success banner.
    pub fn dismiss_success(&mut self) {
        self.booking_success = false;
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn is_booked(&self) -> bool {
        self.is_booked
    }

    pub fn booking_error(&self) -> Option<&str> {
        self.booking_error.as_deref()
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.booking_success.then_some(BOOKING_SUCCEEDED)
    }

    pub fn action(&self) -> BookingAction {
        if self.is_booked {
            BookingAction::Booked
        } else if self.booking_in_flight {
            BookingAction::Booking
        } else {
            BookingAction::BookNow
        }
    }
}
