//! Helpers shared by more than one conversion direction

pub mod escape;
pub mod protect;
pub mod tabular;
pub mod text;
