// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote API access.

pub mod backend;

pub use backend::BackendClient;
