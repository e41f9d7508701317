//! Command implementations

pub mod common;
pub mod compile;
pub mod test_connection;
pub mod validate;
