//! # Wire Contract
//!
//! Protobuf bindings for `reverse.ReverseService`.
//!
//! The bindings are checked in under `generated/` so building the crate does not
//! require `protoc`. Regenerate them with the `gen-proto` feature:
//!
//! ```bash
//! cargo run -p rever_core --features gen-proto --bin generate-reverse-client
//! ```
mod generated {
    pub mod reverse {
        include!("pb/generated/reverse.rs");
    }
}

pub use generated::reverse::{
    ReverseRequest, ReverseResponse, reverse_service_client::ReverseServiceClient,
};
