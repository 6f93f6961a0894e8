pub mod column;
pub mod context;
pub mod dialect;
