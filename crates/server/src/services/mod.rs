//! Business logic services for the catalog server.
//!
//! # Services
//!
//! - `auth` - Session token issuance and verification

pub mod auth;
