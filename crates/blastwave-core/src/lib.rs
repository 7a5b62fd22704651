//! Core types and definitions for the BLASTWAVE damage engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, teams, effect events, tick reports, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod teams;
pub mod types;
