//! transcribe-manager resources.

pub mod transcribe;
pub mod transcript;
