//! Command implementations

pub mod exec;
pub mod install;
pub mod list;
pub mod status;
pub mod version;
