//! Small helpers shared by the rest of the crate.

pub mod cast;
pub mod math;
