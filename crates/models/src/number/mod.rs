//! number-manager resources.

pub mod available_number;
pub mod number;
