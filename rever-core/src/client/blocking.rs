//! # Blocking Client
//!
//! A synchronous facade over [`ReverseClient`] for callers that are not running an
//! async runtime. Each [`BlockingReverseClient`] owns a small tokio runtime that
//! drives the channel and blocks the calling thread on every call.
//!
//! Calling these methods from within an async context panics, as with any
//! `Runtime::block_on`.
use super::{CallError, CallOptions, ConnectionError, ReverseClient};
use crate::{config::ClientConfig, endpoint::Endpoint};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tonic::transport::Channel;

#[derive(Debug)]
pub struct BlockingReverseClient {
    inner: ReverseClient<Channel>,
    rt: Runtime,
}

impl BlockingReverseClient {
    /// Opens a lazily-connected channel to `endpoint`.
    pub fn open(endpoint: &Endpoint) -> Result<Self, ConnectionError> {
        Self::open_with(&ClientConfig {
            endpoint: endpoint.clone(),
            ..ClientConfig::default()
        })
    }

    /// Opens a lazily-connected channel using every setting in `config`.
    pub fn open_with(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("rever-blocking")
            .enable_all()
            .build()
            .map_err(ConnectionError::Runtime)?;

        // The lazy channel spawns its background worker on the current runtime.
        let inner = {
            let _guard = rt.enter();
            ReverseClient::open_with(config)?
        };

        Ok(Self { inner, rt })
    }

    pub fn options(&self) -> &CallOptions {
        self.inner.options()
    }

    /// Reverses `data`, blocking until the reply arrives or the default deadline passes.
    pub fn reverse(&self, data: &str) -> Result<String, CallError> {
        self.rt.block_on(self.inner.reverse(data))
    }

    /// Reverses `data`, blocking for at most `deadline`.
    pub fn reverse_with_deadline(&self, data: &str, deadline: Duration) -> Result<String, CallError> {
        self.rt
            .block_on(self.inner.reverse_with_deadline(data, deadline))
    }

    /// Releases the underlying transport. Idempotent.
    pub fn close(&mut self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
