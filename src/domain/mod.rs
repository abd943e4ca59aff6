//! Core domain types and logic.

pub mod error;
pub mod investor;
pub mod loader;
pub mod record;
pub mod settings;
pub mod store;
