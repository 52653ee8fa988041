//! Advisor adapters.

mod scripted;

pub use scripted::{AdvisorCall, ScriptedAdvisor};
