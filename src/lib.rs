// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Event Booking Client: session and booking state for the event booking API
//!
//! This crate provides the client side of the event booking application:
//! a session store that persists the bearer credential, route gates, and
//! headless view controllers that keep their cached state consistent with
//! the remote API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod time_utils;
pub mod views;

use config::Config;
use error::Result;
use services::BackendClient;
use session::SessionStore;
use std::sync::Arc;
use storage::{CredentialStore, FileCredentialStore};

/// Shared client state, built once at startup.
pub struct App {
    pub config: Config,
    pub session: Arc<SessionStore>,
}

impl App {
    /// Client persisting its credential under `config.credential_dir`.
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(config.credential_dir.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let backend = BackendClient::from_config(&config)?;
        let session = Arc::new(SessionStore::new(backend, store));
        Ok(Self { config, session })
    }

    pub fn home(&self) -> views::HomeView {
        views::HomeView::new(self.session.clone())
    }

    pub fn event_detail(&self, event_id: impl Into<String>) -> views::EventDetailView {
        views::EventDetailView::new(self.session.clone(), event_id)
    }

    pub fn booking_history(&self) -> views::BookingHistoryView {
        views::BookingHistoryView::new(self.session.clone(), self.config.cancel_policy)
    }

    pub fn add_event(&self) -> views::AddEventView {
        views::AddEventView::new(self.session.clone())
    }

    pub fn admin(&self) -> views::AdminView {
        views::AdminView::new(self.session.clone())
    }

    pub fn navbar(&self) -> views::Navbar {
        views::Navbar::new(self.session.clone())
    }
}
