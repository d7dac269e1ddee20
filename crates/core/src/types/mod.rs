//! Core types for the UB Jewellers catalog.
//!
//! This module provides type-safe wrappers for the documents the service
//! stores and serves.

pub mod document;
pub mod id;
pub mod product;

pub use document::{CollectionName, Document, ID_FIELD, InsertOneResult, with_id};
pub use id::DocumentId;
pub use product::Product;
