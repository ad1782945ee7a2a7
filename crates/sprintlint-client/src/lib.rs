//! Sprintlint tracking-service client
//!
//! Everything between a check's intent and the wire lives here:
//!
//! - [`AttributeMap`]: per-entity-kind field paths for each scope-filter
//!   dimension
//! - [`ScopeOptions`]: the run-wide owner/iteration/feature filters
//! - [`inject_filters`]: AND-merges the active scope filters into whatever
//!   query a check supplied
//! - [`Tracker`]: the single choke point every check fetches through
//! - [`TrackerClient`]: the transport seam, with [`WsapiClient`] as the
//!   real HTTP implementation and in-memory fakes in tests
//!
//! The model is fully synchronous: one blocking round-trip per fetch, no
//! shared mutable state across checks.

pub mod attributes;
pub mod client;
pub mod entity;
pub mod fetch;
pub mod inject;
pub mod scope;
pub mod wsapi;

pub use attributes::{AttributeMap, FilterDimension};
pub use client::{FetchResponse, TrackerClient, TransportError};
pub use entity::Entity;
pub use fetch::{FetchError, Tracker};
pub use inject::inject_filters;
pub use scope::{IterationFilter, ScopeOptions, UnknownIterationFilter, UnmappedDimension};
pub use wsapi::{WsapiClient, WsapiConfig};
