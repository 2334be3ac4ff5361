// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event detail view tests: loading and booking.

use axum::http::StatusCode;
use event_booking_client::views::event_detail::{
    BOOKING_FAILED, BOOKING_SUCCEEDED, FETCH_EVENT_FAILED,
};
use event_booking_client::views::{BookingAction, EventDetailView};
use serde_json::json;

mod common;
use common::event_json;

#[tokio::test]
async fn test_load_marks_already_booked() {
    let (backend, user, session, _store) = common::logged_in(false).await;
    backend.state.add_event(event_json("e1", "Jazz Night"));
    backend.state.add_booking(
        &user.id,
        json!({ "_id": "b1", "event": { "_id": "e1" }, "status": "Booked" }),
    );

    let mut detail = EventDetailView::new(session, "e1");
    detail.load().await;

    assert_eq!(detail.error(), None);
    assert_eq!(detail.event().unwrap().title, "Jazz Night");
    assert!(detail.is_booked());
    assert_eq!(detail.action(), BookingAction::Booked);
}

#[tokio::test]
async fn test_book_marks_booked_after_ack() {
    let (backend, _user, session, _store) = common::logged_in(false).await;
    backend.state.add_event(event_json("e1", "Jazz Night"));

    let mut detail = EventDetailView::new(session, "e1");
    detail.load().await;
    assert!(!detail.is_booked());
    assert_eq!(detail.action().label(), "Book Now");

    detail.book().await;

    assert!(detail.is_booked());
    assert_eq!(detail.booking_error(), None);
    assert_eq!(detail.success_message(), Some(BOOKING_SUCCEEDED));
    assert_eq!(backend.state.hits("POST /api/bookings"), 1);

    detail.dismiss_success();
    assert_eq!(detail.success_message(), None);

    // Booking again is a no-op
    detail.book().await;
    assert_eq!(backend.state.hits("POST /api/bookings"), 1);
}

#[tokio::test]
async fn test_book_failure_stays_unbooked() {
    let (backend, _user, session, _store) = common::logged_in(false).await;
    backend.state.add_event(event_json("e1", "Jazz Night"));
    backend.state.fail_next(
        "POST /api/bookings",
        StatusCode::BAD_REQUEST,
        json!({ "message": "Event is sold out" }),
    );

    let mut detail = EventDetailView::new(session, "e1");
    detail.load().await;
    detail.book().await;

    assert!(!detail.is_booked());
    assert_eq!(detail.booking_error(), Some("Event is sold out"));
    assert_eq!(detail.success_message(), None);
    assert_eq!(detail.action(), BookingAction::BookNow);
}

#[tokio::test]
async fn test_book_failure_without_message() {
    let (backend, _user, session, _store) = common::logged_in(false).await;
    backend.state.add_event(event_json("e1", "Jazz Night"));
    backend.state.fail_next(
        "POST /api/bookings",
        StatusCode::SERVICE_UNAVAILABLE,
        json!(null),
    );

    let mut detail = EventDetailView::new(session, "e1");
    detail.load().await;
    detail.book().await;

    assert_eq!(detail.booking_error(), Some(BOOKING_FAILED));
}

#[tokio::test]
async fn test_unknown_event() {
    let (_backend, _user, session, _store) = common::logged_in(false).await;

    let mut detail = EventDetailView::new(session, "missing");
    detail.load().await;

    assert!(!detail.is_loading());
    assert_eq!(detail.error(), Some(FETCH_EVENT_FAILED));
    assert!(detail.event().is_none());
}
