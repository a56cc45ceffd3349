//! outdial-manager resources.

pub mod outdial;
pub mod outdialtarget;
