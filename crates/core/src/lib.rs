//! UB Jewellers Core - Shared catalog types and query engine.
//!
//! This crate provides the types used across all UB Jewellers components:
//! - `server` - The public JSON API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Documents, collection names, identifiers and products
//! - [`catalog`] - Product filtering, sorting and text search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
