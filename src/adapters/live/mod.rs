//! Live adapters backed by real collaborators.

pub mod extract;
pub mod model;
pub mod sleeper;
pub mod store;

pub use extract::PlainTextExtractor;
pub use model::LiveModelClient;
pub use sleeper::TokioSleeper;
pub use store::JsonFileStore;
