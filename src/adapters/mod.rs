//! Adapters - Concrete implementations of this core's ports.

pub mod advisor;
pub mod hashing;
