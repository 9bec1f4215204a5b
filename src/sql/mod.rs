//! Parameterized statements for the customer table: fixed identifiers, values always bound.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
