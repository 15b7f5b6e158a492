// Whole-input parse drivers

pub mod direct;
pub mod parallel;

pub use direct::*;
pub use parallel::*;
