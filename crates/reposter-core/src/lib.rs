//! Core domain + application logic for the reposter bot.
//!
//! This crate is framework-agnostic. Telegram and Redis live behind ports
//! (traits) implemented in adapter crates.

pub mod auth;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod relay;
pub mod reporting;
pub mod store;

pub use errors::{Error, Result};
