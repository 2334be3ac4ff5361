// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation middleware (route gates).

pub mod gate;

pub use gate::{Gate, GateDecision, GuardAction, RouteGuard};
