//! Port traits between the domain and its adapters.

pub mod config_port;
pub mod investor_port;
pub mod source_port;
