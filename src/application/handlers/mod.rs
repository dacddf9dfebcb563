//! Command and query handlers, one module per operation.

pub mod membership;
