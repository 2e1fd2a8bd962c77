//! Shared leaf utilities for the fxlab playground crates.
//!
//! Identifier generation, media-kind classification, and common type
//! aliases. This crate has no network or runtime dependencies.

pub mod id;
pub mod media;
pub mod types;
