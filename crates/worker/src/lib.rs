//! Shared worker runtime primitives.
//!
//! This crate centralizes task classification and spawn helpers used by the
//! diagnostic coordinator's compute tasks.
#![warn(missing_docs)]

mod class;
mod join;
mod spawn;

pub use class::TaskClass;
pub use join::join_error_panic_message;
pub use spawn::spawn;
