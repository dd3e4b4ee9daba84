//! CLI command implementations.

pub mod bell;
pub mod common;
pub mod gates;
pub mod run;
pub mod version;
