//! flow-manager resources.

pub mod action;
pub mod activeflow;
pub mod flow;
