//! Ageless Republic Admin library.
//!
//! This crate provides the admin panel functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds privileged access to the game backend:
//! - Player, account and guild moderation (bans, stat edits)
//! - Economy controls and reward-rule configuration
//! - Manual reward payouts
//! - Operator role management
//!
//! Only deploy on VPN-protected infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod game;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
