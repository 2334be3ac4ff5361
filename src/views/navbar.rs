// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation bar.

use crate::routes::Route;
use crate::session::{Session, SessionStore};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    /// "Welcome, {name}" for the logged-in user
    Greeting(String),
    Link { label: &'static str, route: Route },
    Logout,
}

pub struct Navbar {
    session: Arc<SessionStore>,
}

impl Navbar {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn items(&self) -> Vec<NavItem> {
        items_for(&self.session.snapshot())
    }

    /// Log out and return the route to show next.
    pub fn logout(&self) -> Route {
        self.session.logout();
        Route::Login
    }
}

/// Nav entries for a session state.
pub fn items_for(session: &Session) -> Vec<NavItem> {
    if !session.is_authenticated() {
        return vec![
            NavItem::Link {
                label: "Login",
                route: Route::Login,
            },
            NavItem::Link {
                label: "Register",
                route: Route::Register,
            },
        ];
    }

    let name = session.identity().map(|i| i.name.as_str()).unwrap_or_default();
    let mut items = vec![
        NavItem::Greeting(format!("Welcome, {}", name)),
        NavItem::Link {
            label: "Events",
            route: Route::Home,
        },
        NavItem::Link {
            label: "My Bookings",
            route: Route::Bookings,
        },
    ];
    if session.is_admin() {
        items.push(NavItem::Link {
            label: "Add Event",
            route: Route::AddEvent,
        });
    }
    items.push(NavItem::Logout);
    items
}
