//! Shared utilities for the Connect backend.
//!
//! This crate provides logging setup and time helpers used by the server
//! binary and its tests.

pub mod logger;
pub mod time;
