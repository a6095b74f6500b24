//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the dispatch core and an
//! external system (the generative backend, the backoff timer, document
//! text extraction, session persistence). Implementations live in
//! `src/adapters/`.

pub mod extract;
pub mod model;
pub mod sleeper;
pub mod store;

pub use extract::{ExtractError, TextExtractor};
pub use model::{
    BackendError, GenerationFuture, GenerationRequest, GenerationResponse, ImageFuture,
    ImageRequest, ImageResponse, ModelClient,
};
pub use sleeper::{SleepFuture, Sleeper};
pub use store::{Session, SessionStore, StoreError, StoredMessage};
