//! StaffLink client — session and authentication layer for the
//! StaffLink platform.
//!
//! The entry point is [`auth::SessionClient`]: construct it once at
//! app boot with a transport and a credential store, then use it for
//! login/logout, role checks, and authenticated resource requests.
//! Token refresh is transparent: expired tokens are renewed before a
//! request goes out, a 401 triggers one refresh-and-retry, and a
//! background loop keeps the token fresh between requests.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod traits;
