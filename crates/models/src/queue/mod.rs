//! queue-manager resources.

pub mod queue;
pub mod queuecall;
