// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client route table.

use crate::middleware::Gate;
use std::fmt;

/// Navigable views of the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    EventDetail(String),
    Bookings,
    AddEvent,
    Admin,
}

impl Route {
    /// Gate that must pass before the route renders.
    pub fn gate(&self) -> Gate {
        match self {
            Route::Login | Route::Register => Gate::Public,
            Route::Home | Route::EventDetail(_) | Route::Bookings | Route::Admin => Gate::Protected,
            Route::AddEvent => Gate::Admin,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/".to_string(),
            Route::EventDetail(id) => format!("/events/{}", urlencoding::encode(id)),
            Route::Bookings => "/bookings".to_string(),
            Route::AddEvent => "/add-event".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    /// Match a path against the route table. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/bookings" => Some(Route::Bookings),
            "/add-event" => Some(Route::AddEvent),
            "/admin" => Some(Route::Admin),
            other => {
                let id = other.strip_prefix("/events/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(id).ok()?;
                Some(Route::EventDetail(id.into_owned()))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
