//! Social backend application library.
//!
//! This library provides the backend for a social application: account
//! registration with OTP mail verification, login with bearer tokens, a post
//! feed, and a realtime WebSocket channel for presence tracking and direct
//! message relay.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
