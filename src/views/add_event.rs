// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin form for creating events.

use crate::error::{ActionFailure, ActionResult, ClientError};
use crate::models::{Event, NewEvent};
use crate::routes::Route;
use crate::session::SessionStore;
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

pub const CREATE_EVENT_FAILED: &str = "Failed to create event";
pub const EVENT_CREATED: &str = "Event created successfully!";
pub const DEFAULT_TIME: &str = "12:00";

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct AddEventForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    /// `HH:MM`
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    /// Decimal string; blank means free
    pub price: String,
}

impl Default for AddEventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            time: DEFAULT_TIME.to_string(),
            price: String::new(),
        }
    }
}

impl AddEventForm {
    /// Validate and convert, reading date and time in `tz`.
    pub fn to_new_event<Tz: TimeZone>(&self, tz: &Tz) -> ActionResult<NewEvent> {
        let trimmed = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            price: self.price.trim().to_string(),
        };
        trimmed
            .validate()
            .map_err(|errors| ActionFailure::new(first_message(&errors)))?;

        let date = NaiveDate::parse_from_str(&trimmed.date, "%Y-%m-%d")
            .map_err(|_| ActionFailure::new("Date must be YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(&trimmed.time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&trimmed.time, "%H:%M:%S"))
            .map_err(|_| ActionFailure::new("Time must be HH:MM"))?;
        let local = tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(|| ActionFailure::new("Date and time do not exist in the local time zone"))?;

        Ok(NewEvent {
            title: trimmed.title,
            description: trimmed.description,
            date: local.with_timezone(&Utc),
            price: parse_price(&trimmed.price)?,
        })
    }
}

fn parse_price(raw: &str) -> ActionResult<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| ActionFailure::new("Price must be a non-negative number"))
}

/// First validation message, in form field order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["title", "description", "date", "time"]
        .iter()
        .filter_map(|name| fields.get(*name))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid event details".to_string())
}

pub struct AddEventView {
    session: Arc<SessionStore>,
    pub form: AddEventForm,
    submitting: bool,
    error: Option<String>,
    success: bool,
}

impl AddEventView {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            form: AddEventForm::default(),
            submitting: false,
            error: None,
            success: false,
        }
    }

    /// Submit using the local time zone. Returns where to navigate on success.
    pub async fn submit(&mut self) -> Option<Route> {
        self.submit_in(&Local).await
    }

    pub async fn submit_in<Tz: TimeZone>(&mut self, tz: &Tz) -> Option<Route> {
        self.submitting = true;
        self.error = None;
        self.success = false;

        let outcome = match self.form.to_new_event(tz) {
            Ok(event) => self.create(&event).await,
            Err(failure) => Err(failure),
        };

        self.submitting = false;
        match outcome {
            Ok(event) => {
                tracing::info!(event_id = %event.id, title = %event.title, "Event created");
                self.success = true;
                self.form = AddEventForm::default();
                Some(Route::Home)
            }
            Err(failure) => {
                self.error = Some(failure.message);
                None
            }
        }
    }

    async fn create(&self, event: &NewEvent) -> ActionResult<Event> {
        let result: Result<Event, ClientError> = match self.session.require_credential() {
            Ok(credential) => self.session.backend().create_event(&credential, event).await,
            Err(err) => Err(err),
        };
        result.map_err(|err| {
            tracing::warn!(error = %err, "Event creation failed");
            err.into_failure(CREATE_EVENT_FAILED)
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.success.then_some(EVENT_CREATED)
    }
}
