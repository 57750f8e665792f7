//! Output formats.

pub mod dot;
pub mod json;
