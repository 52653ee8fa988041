//! Repositories - Owner-scoped durability over the record store.
//!
//! Each repository delegates every durable effect to the [`Store`](crate::store::Store)
//! and forwards its failures unchanged; per-owner partitioning rides on the
//! `owner_username` secondary index.

mod auth;
mod decision;
mod voice;

pub use auth::{AuthError, AuthRegistry};
pub use decision::DecisionRepository;
pub use voice::VoiceRepository;
