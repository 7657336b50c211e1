//! Test utilities for the Harmony client
//!
//! This crate provides an in-memory `HarmonyApi` implementation and builders
//! for the value objects, so Baton can be tested without a maestro.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{ContainerBuilder, MachineBuilder, new_container};
pub use mocks::{Call, MockHarmony};
