//! Utility modules

pub mod dates;
