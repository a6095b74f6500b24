//! Scripted adapters serving queued outcomes for deterministic tests.

pub mod model;
pub mod sleeper;

pub use model::ScriptedModelClient;
pub use sleeper::RecordingSleeper;
