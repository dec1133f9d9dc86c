//! # Rever Core
//!
//! `rever-core` is the library powering the Rever CLI. It provides a small, typed gRPC
//! client for a single remote procedure: `reverse.ReverseService/ReverseString`.
//!
//! ## Key Components
//!
//! * **[`ReverseClient`]:** An async channel to one [`Endpoint`]. It opens lazily, reverses
//!   strings with an explicit deadline on every call, and is closed explicitly (or on drop).
//! * **[`BlockingReverseClient`]:** The same channel behind a synchronous interface, driven by
//!   its own runtime.
//! * **[`ClientConfig`]:** Endpoint, deadlines and metadata, loadable from a JSON file.
//!
//! ## Errors
//!
//! Calls return [`client::CallError`], which is either a [`client::ConnectionError`]
//! (the transport could not be used) or a [`client::RpcError`] (the call reached the server
//! and failed, or ran out of time). Nothing is retried.
//!
//! ## Feature Flags (Internal use only)
//!
//! * `gen-proto`: Enables the binary that regenerates the checked-in protobuf bindings.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod client;
pub mod config;
pub mod endpoint;
pub mod pb;

pub use client::{ReverseClient, blocking::BlockingReverseClient};
pub use config::ClientConfig;
pub use endpoint::Endpoint;

// Re-exports
pub use prost;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
