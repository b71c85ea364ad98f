//! Admin authorization.
//!
//! A single static secret (`ADMIN_PASSWORD`) protects every mutating endpoint
//! and the admin item listing. See `core::middleware::admin_auth_middleware`
//! for how it is attached to routes.

pub mod gate;

pub use gate::AdminGate;
