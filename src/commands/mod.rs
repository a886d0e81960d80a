//! Command implementations for the athena-pack CLI

pub mod build;
pub mod completions;
pub mod helpers;
pub mod plan;
pub mod version;
