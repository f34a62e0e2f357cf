//! Structured logging setup for the token service.
//!
//! # Telemetry invariants
//!
//! - **No token text, plaintext token bytes, or key material** may appear in
//!   any log field. Parse failures are logged by stage and error kind only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
