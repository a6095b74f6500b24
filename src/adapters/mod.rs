//! Adapter implementations of the port traits.
//!
//! `live` adapters talk to real collaborators (the generative backend over
//! HTTP, the tokio timer, the filesystem). `scripted` adapters serve queued
//! canned outcomes and count calls, giving tests deterministic backends
//! without touching the network or the clock.

pub mod live;
pub mod scripted;
