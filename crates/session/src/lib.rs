//! Job lifecycle controller for the fxlab playground.
//!
//! Orchestrates upload -> submit -> poll -> resolve for a single user
//! session, drives the lifecycle state machine, and broadcasts UI
//! events at every transition and failure point.

pub mod config;
pub mod controller;
pub mod events;
pub mod state;
