//! billing-manager resources.

pub mod account;
pub mod allowance;
pub mod billing;
