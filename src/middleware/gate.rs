// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route gates: access checks evaluated against the session.

use crate::routes::Route;
use crate::session::Session;
use tokio::sync::watch;

/// Access requirement of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Anyone may view
    Public,
    /// Requires an authenticated session
    Protected,
    /// Requires an authenticated admin session
    Admin,
}

/// Result of evaluating a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still bootstrapping; show a placeholder, decide nothing yet
    Loading,
    /// Navigate elsewhere instead of rendering
    Redirect(Route),
    /// Render the wrapped view
    Render,
}

impl Gate {
    /// Pure decision from the session state. Never redirects while loading.
    pub fn evaluate(self, session: &Session) -> GateDecision {
        if self == Gate::Public {
            return GateDecision::Render;
        }
        if session.is_loading() {
            return GateDecision::Loading;
        }
        if !session.is_authenticated() {
            return GateDecision::Redirect(Route::Login);
        }
        if self == Gate::Admin && !session.is_admin() {
            return GateDecision::Redirect(Route::Home);
        }
        GateDecision::Render
    }

    /// Wait for bootstrap to finish, then decide.
    pub async fn resolve(self, sessions: &mut watch::Receiver<Session>) -> GateDecision {
        match sessions.wait_for(|s| !s.is_loading()).await {
            Ok(session) => self.evaluate(&session),
            // Store dropped before bootstrap finished; there is no session to wait for.
            Err(_) => GateDecision::Redirect(Route::Login),
        }
    }
}

/// What a mounted guard asks its host to do after observing the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    ShowPlaceholder,
    Navigate(Route),
    /// Redirect already issued; waiting for the host to navigate away
    AwaitNavigation,
    Render,
}

/// Stateful wrapper around a [`Gate`] that issues each redirect only once.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    gate: Gate,
    issued: Option<Route>,
}

impl RouteGuard {
    pub fn new(gate: Gate) -> Self {
        Self { gate, issued: None }
    }

    pub fn for_route(route: &Route) -> Self {
        Self::new(route.gate())
    }

    pub fn observe(&mut self, session: &Session) -> GuardAction {
        match self.gate.evaluate(session) {
            GateDecision::Loading => {
                self.issued = None;
                GuardAction::ShowPlaceholder
            }
            GateDecision::Render => {
                self.issued = None;
                GuardAction::Render
            }
            GateDecision::Redirect(target) => {
                if self.issued.as_ref() == Some(&target) {
                    return GuardAction::AwaitNavigation;
                }
                tracing::debug!(target = %target, "Gate redirect");
                self.issued = Some(target.clone());
                GuardAction::Navigate(target)
            }
        }
    }
}
