//! Data loading and validation for machine settings and prizes.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
