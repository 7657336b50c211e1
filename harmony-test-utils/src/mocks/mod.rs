//! Mock implementations for testing

mod harmony;

pub use harmony::{Call, MockHarmony};
