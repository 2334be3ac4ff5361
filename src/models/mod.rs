// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the booking API.

pub mod booking;
pub mod credential;
pub mod event;
mod ids;
pub mod user;

pub use booking::{BookedSet, Booking, BookingStatus, EventRef, NewBooking};
pub use credential::Credential;
pub use event::{Event, NewEvent};
pub use user::{AuthResponse, Identity, MakeAdminResponse};
