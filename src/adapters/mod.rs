//! Adapters - Implementations of ports for specific technologies.

pub mod http;
pub mod memory;
pub mod postgres;
