//! Authentication and session lifecycle.
//!
//! This module provides:
//! - [`token`]: token pair model and JWT expiry inspection
//! - [`api`]: client for the auth server's login/refresh/logout
//!   endpoints
//! - [`manager`]: token lifecycle owner with refresh de-duplication
//! - [`refresh_loop`]: proactive background refresh
//! - [`session`]: the [`SessionClient`] facade everything else calls

pub mod api;
pub mod manager;
pub mod refresh_loop;
pub mod session;
pub mod token;

pub use api::{AuthApiClient, LoginResponse, RefreshResponse};
pub use manager::TokenManager;
pub use refresh_loop::RefreshLoop;
pub use session::SessionClient;
pub use token::TokenPair;
