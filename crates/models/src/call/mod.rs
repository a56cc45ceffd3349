//! call-manager resources.

pub mod call;
pub mod groupcall;
pub mod recording;
