//! # delivre-store
//!
//! SQLite-backed catalog, sessions, and administrator registry for Delivre.

mod password;
pub mod store;

pub use store::Store;
