//! Route handlers.
//!
//! Handlers receive their collaborators (the connection pool, the auth
//! configuration, the notifier) through `Extension` layers installed once at
//! startup; no handler touches process-global state.

pub mod auth;
pub mod contact;
pub mod health;
pub mod home;
