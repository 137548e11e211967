//! Address-level models: literals, ordinals, ranges and network lists.

pub mod address;
pub mod range;
pub mod target;
