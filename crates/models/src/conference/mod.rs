//! conference-manager resources.

pub mod conference;
pub mod conferencecall;
