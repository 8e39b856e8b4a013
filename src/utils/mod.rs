//! Small shared utilities.

pub mod date;
pub mod text;
