//! route-manager resources. Providers are project-wide; routes pick a
//! provider per customer and destination prefix.

pub mod provider;
pub mod route;
