//! Domain models for the zhiyao system.

mod drug;
mod interaction;

pub use drug::*;
pub use interaction::*;
