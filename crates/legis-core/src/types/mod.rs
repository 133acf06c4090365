//! Core types for legis.

mod outcome;
mod record;
mod source;
pub mod wall_clock;

pub use outcome::*;
pub use record::*;
pub use source::*;
