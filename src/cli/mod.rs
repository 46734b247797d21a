//! CLI command implementations

pub mod add;
pub mod export;
pub mod games;
pub mod import;
