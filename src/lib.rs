//! Eunoia - Decision Clarity Engine
//!
//! This crate implements the persistence and domain core of the Eunoia
//! decision-analysis application: a partitioned, transactional local record
//! store with secondary indexing, owner-scoped repositories for decisions
//! and custom voices, a credential registry, and the recursive
//! weight-aggregating factor tree that represents a user's "Decision DNA".
//!
//! The generative-AI collaborator that suggests and breaks down factors is
//! consumed through the [`ports::DecisionAdvisor`] port; this crate supplies
//! no transport to it and no rendering of its results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod repository;
pub mod store;
pub mod telemetry;
