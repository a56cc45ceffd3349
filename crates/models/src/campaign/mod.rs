//! campaign-manager resources.

pub mod campaign;
pub mod campaigncall;
pub mod outplan;
