//! storage-manager resources.

pub mod account;
pub mod bucketfile;
pub mod file;
