//! Ageless Republic Core - Shared types library.
//!
//! This crate provides common types used across the Ageless Republic admin
//! panel components:
//! - `admin` - Internal administration panel for the game backend
//! - `integration-tests` - End-to-end tests against a mock game backend
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and operator roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
