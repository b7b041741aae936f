//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod health;
pub mod invoke;
