//! CLI command implementations.

pub mod fingerprint;
pub mod list;
pub mod publish;
pub mod verify;
