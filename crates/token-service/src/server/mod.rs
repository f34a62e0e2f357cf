//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Issue user and device tokens for the token-issuing side.
//! - Validate caller tokens on protected routes ([`middleware::require_caller`]).
//! - Inject shared application state (`AppState`) into handlers.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
