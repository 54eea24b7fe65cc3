//! SQL queries, one module per table group.

pub mod analyses;
pub mod history;
pub mod usage;
