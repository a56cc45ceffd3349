//! registrar-manager resources: SIP domains, extensions and trunks.

pub mod domain;
pub mod extension;
pub mod trunk;
