//! Chroma generation-service client library.
//!
//! Wraps the Chroma media-effects HTTP API: job submission, bounded
//! status polling, and tolerant resolution of terminal result payloads
//! into a canonical media URL.

pub mod api;
pub mod job;
pub mod poll;
pub mod resolve;
pub mod status;
