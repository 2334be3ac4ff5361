// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin page: profile summary and self-promotion to admin.

use crate::session::SessionStore;
use std::sync::Arc;

/// Profile lines shown on the admin page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub role: &'static str,
}

pub struct AdminView {
    session: Arc<SessionStore>,
    in_flight: bool,
    message: Option<String>,
    error: Option<String>,
}

impl AdminView {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            in_flight: false,
            message: None,
            error: None,
        }
    }

    pub fn profile(&self) -> Option<ProfileSummary> {
        let session = self.session.snapshot();
        let identity = session.identity()?;
        Some(ProfileSummary {
            name: identity.name.clone(),
            email: identity.email.clone().unwrap_or_default(),
            role: if identity.is_admin { "Admin" } else { "Regular User" },
        })
    }

    /// The Make Admin control exists only for logged-in non-admins.
    pub fn show_make_admin(&self) -> bool {
        let session = self.session.snapshot();
        session.is_authenticated() && !session.is_admin()
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight {
            "Processing..."
        } else {
            "Make Admin"
        }
    }

    pub async fn make_admin(&mut self) {
        if !self.show_make_admin() || self.in_flight {
            return;
        }

        self.in_flight = true;
        self.message = None;
        self.error = None;

        match self.session.make_admin().await {
            Ok(message) => self.message = Some(message),
            Err(failure) => self.error = Some(failure.message),
        }

        self.in_flight = false;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
