// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking history view and cancellation.
//!
//! Cancellation is optimistic: the booking shows as Canceled as soon as
//! the request is dispatched. What happens when the server rejects it is
//! decided by [`CancelPolicy`].

use crate::error::ClientError;
use crate::models::{Booking, BookingStatus};
use crate::session::SessionStore;
use std::sync::Arc;

pub const FETCH_BOOKINGS_FAILED: &str = "Failed to fetch bookings";
pub const CANCEL_FAILED: &str = "Failed to cancel booking";

/// Handling of a cancellation the server rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Restore the previous status and show the error
    #[default]
    RollbackOnFailure,
    /// Keep showing Canceled and only show the error
    KeepOptimistic,
}

impl CancelPolicy {
    /// Parse `rollback` / `keep` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rollback" => Some(CancelPolicy::RollbackOnFailure),
            "keep" => Some(CancelPolicy::KeepOptimistic),
            _ => None,
        }
    }
}

/// Badge style of a booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Danger,
    Neutral,
}

impl From<BookingStatus> for StatusTone {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Booked => StatusTone::Info,
            BookingStatus::Completed => StatusTone::Success,
            BookingStatus::Canceled => StatusTone::Danger,
            BookingStatus::Unknown => StatusTone::Neutral,
        }
    }
}

/// A cancellation that has been applied locally but not yet confirmed.
#[derive(Debug)]
#[must_use = "pass to complete_cancel once the server answers"]
pub struct PendingCancel {
    booking_id: String,
    previous: BookingStatus,
}

impl PendingCancel {
    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }
}

pub struct BookingHistoryView {
    session: Arc<SessionStore>,
    policy: CancelPolicy,
    loading: bool,
    error: Option<String>,
    bookings: Vec<Booking>,
}

impl BookingHistoryView {
    pub fn new(session: Arc<SessionStore>, policy: CancelPolicy) -> Self {
        Self {
            session,
            policy,
            loading: true,
            error: None,
            bookings: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        let result = match self.session.require_credential() {
            Ok(credential) => self.session.backend().list_user_bookings(&credential).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(bookings) => self.bookings = bookings,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load bookings");
                self.error = Some(FETCH_BOOKINGS_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Cancel a booking: flip it locally, ask the server, settle per policy.
    pub async fn cancel(&mut self, booking_id: &str) {
        let Some(pending) = self.begin_cancel(booking_id) else {
            return;
        };

        let result = match self.session.require_credential() {
            Ok(credential) => {
                self.session
                    .backend()
                    .cancel_booking(&credential, booking_id)
                    .await
            }
            Err(err) => Err(err),
        };

        self.complete_cancel(pending, result);
    }

    /// Mark the booking Canceled before any request is sent.
    ///
    /// Returns `None` when the booking is unknown or not cancellable.
    pub fn begin_cancel(&mut self, booking_id: &str) -> Option<PendingCancel> {
        let booking = self.bookings.iter_mut().find(|b| b.id == booking_id)?;
        if booking.status != BookingStatus::Booked {
            return None;
        }

        let previous = booking.status;
        booking.status = BookingStatus::Canceled;
        Some(PendingCancel {
            booking_id: booking_id.to_string(),
            previous,
        })
    }

    /// Apply the server's answer to a pending cancellation.
    pub fn complete_cancel(&mut self, pending: PendingCancel, result: Result<(), ClientError>) {
        let err = match result {
            Ok(()) => {
                tracing::info!(booking_id = %pending.booking_id, "Booking canceled");
                return;
            }
            Err(err) => err,
        };

        tracing::warn!(
            booking_id = %pending.booking_id,
            policy = ?self.policy,
            error = %err,
            "Cancellation failed"
        );
        self.error = Some(err.into_failure(CANCEL_FAILED).message);

        if self.policy == CancelPolicy::RollbackOnFailure {
            if let Some(booking) = self
                .bookings
                .iter_mut()
                .find(|b| b.id == pending.booking_id)
            {
                booking.status = pending.previous;
            }
        }
    }

    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    /// Whether the Cancel control is shown for a booking.
    pub fn can_cancel(booking: &Booking) -> bool {
        booking.status == BookingStatus::Booked
    }
}
