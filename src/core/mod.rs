//! Core report logic

pub mod periods;
pub mod reports;
pub mod weeks;

#[cfg(test)]
pub mod testing;

pub use periods::Period;
