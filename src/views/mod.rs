// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless view controllers.
//!
//! Each view fetches its own resources on [`load`](home::HomeView::load),
//! keeps view-level state (loading flag, error message, data) and exposes
//! the render decisions of the client: labels, visible controls, links.
//! Action handlers never return errors; failures land in the view's
//! error fields.

pub mod add_event;
pub mod admin;
pub mod bookings;
pub mod event_detail;
pub mod home;
pub mod navbar;

pub use add_event::{AddEventForm, AddEventView};
pub use admin::{AdminView, ProfileSummary};
pub use bookings::{BookingHistoryView, CancelPolicy, PendingCancel, StatusTone};
pub use event_detail::EventDetailView;
pub use home::{EventCard, HomeView};
pub use navbar::{items_for, NavItem, Navbar};

/// Label of the booking control for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Already booked; control disabled
    Booked,
    /// Booking request in flight
    Booking,
    BookNow,
}

impl BookingAction {
    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Booked => "Booked",
            BookingAction::Booking => "Booking...",
            BookingAction::BookNow => "Book Now",
        }
    }
}
