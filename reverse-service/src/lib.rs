//! # Reverse Service
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide the server side of the
//! `reverse.ReverseService` contract for integration testing `rever_core`.
//! It is not intended for production use.

pub mod pb {
    include!("generated/reverse.rs");
}

pub use pb::reverse_service_server::{ReverseService, ReverseServiceServer};
