//! # delivre-core
//!
//! Core types, menu projection, order links, form shaping, configuration,
//! and error handling for Delivre.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod locale;
pub mod menu;
pub mod order;
pub mod traits;

pub use config::shellexpand;
