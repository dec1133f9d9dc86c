//! # Reverse Client
//!
//! This module implements the RPC client channel for `reverse.ReverseService`.
//!
//! A [`ReverseClient`] owns one logical connection to an [`Endpoint`]. Opening it is
//! lazy: no TCP connection is attempted until the first call, so an unreachable
//! endpoint surfaces as a [`CallError`] from [`ReverseClient::reverse`], not from
//! [`ReverseClient::open`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use rever_core::{client::ReverseClient, endpoint::Endpoint};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = ReverseClient::open(&Endpoint::default())?;
//! let reversed = client.reverse("Hello, World").await?;
//! assert_eq!(reversed, "dlroW ,olleH");
//! client.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns `Result<String, CallError>`, where [`CallError`] separates
//! transport problems ([`ConnectionError`]) from failures of a call that did reach
//! the server ([`RpcError`]).
pub mod blocking;

use crate::{
    BoxError,
    config::{ClientConfig, DEFAULT_TIMEOUT},
    endpoint::Endpoint,
    pb::{ReverseRequest, ReverseServiceClient},
};
use http_body::Body as HttpBody;
use std::{str::FromStr, time::Duration};
use tonic::{
    Code, Status,
    client::GrpcService,
    metadata::{
        MetadataKey, MetadataValue,
        errors::{InvalidMetadataKey, InvalidMetadataValue},
    },
    transport::Channel,
};
use tracing::{debug, warn};

/// Largest timeout the `grpc-timeout` header can carry (8 digits of hours).
const MAX_GRPC_TIMEOUT: Duration = Duration::from_secs(99_999_999 * 60 * 60);

/// The channel could not be established, or the transport is gone.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Invalid endpoint '{endpoint}': '{source}'")]
    InvalidEndpoint {
        endpoint: String,
        source: tonic::transport::Error,
    },
    #[error("Failed to connect to '{endpoint}': '{source}'")]
    ConnectFailed {
        endpoint: String,
        source: tonic::transport::Error,
    },
    #[error("Service unavailable: '{0}'")]
    Unavailable(String),
    #[error("The channel has been closed")]
    Closed,
    #[error("Failed to start the client runtime: '{0}'")]
    Runtime(#[source] std::io::Error),
}

/// The remote call failed after a connection existed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RpcError {
    #[error("Remote call failed with code '{code:?}': '{message}'")]
    Status { code: Code, message: String },
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error("Invalid metadata (header) key '{key}': '{reason}'")]
    InvalidMetadataKey { key: String, reason: String },
    #[error("Invalid metadata (header) value for key '{key}': '{reason}'")]
    InvalidMetadataValue { key: String, reason: String },
}

impl RpcError {
    /// The gRPC status code this error corresponds to.
    pub fn code(&self) -> Code {
        match self {
            RpcError::Status { code, .. } => *code,
            RpcError::DeadlineExceeded(_) => Code::DeadlineExceeded,
            RpcError::InvalidMetadataKey { .. } | RpcError::InvalidMetadataValue { .. } => {
                Code::InvalidArgument
            }
        }
    }
}

/// Errors returned by a reverse call.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl CallError {
    fn from_status(status: Status, deadline: Duration) -> Self {
        match status.code() {
            Code::Unavailable => ConnectionError::Unavailable(status.message().to_string()).into(),
            Code::DeadlineExceeded => RpcError::DeadlineExceeded(deadline).into(),
            code => RpcError::Status {
                code,
                message: status.message().to_string(),
            }
            .into(),
        }
    }
}

/// Defaults applied to every call made through a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    /// Deadline used by [`ReverseClient::reverse`].
    pub timeout: Duration,
    /// gRPC metadata attached to each request.
    pub headers: Vec<(String, String)>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            headers: vec![],
        }
    }
}

impl From<&ClientConfig> for CallOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout(),
            headers: config.headers.clone(),
        }
    }
}

/// A channel to a reverse service.
///
/// Calls take `&self`: each call works on its own clone of the underlying stub, so a
/// single channel can serve several concurrent callers.
#[derive(Debug, Clone)]
pub struct ReverseClient<S = Channel> {
    client: Option<ReverseServiceClient<S>>,
    options: CallOptions,
}

impl ReverseClient<Channel> {
    /// Opens a lazily-connected plaintext channel to `endpoint`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(ReverseClient)` - The channel. Nothing has been dialed yet.
    /// * `Err(ConnectionError::InvalidEndpoint)` - If the endpoint does not form a valid URI.
    pub fn open(endpoint: &Endpoint) -> Result<Self, ConnectionError> {
        Self::open_with(&ClientConfig {
            endpoint: endpoint.clone(),
            ..ClientConfig::default()
        })
    }

    /// Opens a lazily-connected channel using every setting in `config`.
    pub fn open_with(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let endpoint = transport_endpoint(config)?;

        debug!(endpoint = %config.endpoint, "opening lazy channel");

        Ok(Self::from_service(endpoint.connect_lazy()).with_options(CallOptions::from(config)))
    }

    /// Opens a channel and dials `config.endpoint` right away.
    ///
    /// # Returns
    ///
    /// * `Err(ConnectionError::ConnectFailed)` - If nothing accepts the connection.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let endpoint = transport_endpoint(config)?;

        debug!(endpoint = %config.endpoint, "connecting");

        let channel =
            endpoint
                .connect()
                .await
                .map_err(|source| ConnectionError::ConnectFailed {
                    endpoint: config.endpoint.to_string(),
                    source,
                })?;

        Ok(Self::from_service(channel).with_options(CallOptions::from(config)))
    }
}

impl<S> ReverseClient<S>
where
    S: GrpcService<tonic::body::Body> + Clone,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            client: Some(ReverseServiceClient::new(service)),
            options: CallOptions::default(),
        }
    }

    /// Replaces the per-call defaults of this channel.
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    /// Reverses `data` on the remote service using the channel's default deadline.
    pub async fn reverse(&self, data: &str) -> Result<String, CallError> {
        self.reverse_with_deadline(data, self.options.timeout).await
    }

    /// Reverses `data` on the remote service, failing with
    /// [`RpcError::DeadlineExceeded`] if no reply arrives within `deadline`.
    ///
    /// The deadline is enforced locally and also sent to the server as `grpc-timeout`.
    /// Dropping the returned future cancels the call.
    pub async fn reverse_with_deadline(
        &self,
        data: &str,
        deadline: Duration,
    ) -> Result<String, CallError> {
        let mut client = self.client.clone().ok_or(ConnectionError::Closed)?;

        let mut request = build_request(data, &self.options.headers)?;
        // The header is capped; the local timer still enforces the full deadline.
        request.set_timeout(deadline.min(MAX_GRPC_TIMEOUT));

        debug!(len = data.len(), ?deadline, "calling ReverseString");

        let result = match tokio::time::timeout(deadline, client.reverse_string(request)).await {
            Ok(Ok(response)) => Ok(response.into_inner().reversed),
            Ok(Err(status)) => Err(CallError::from_status(status, deadline)),
            Err(_elapsed) => Err(RpcError::DeadlineExceeded(deadline).into()),
        };

        if let Err(err) = &result {
            warn!(error = %err, "ReverseString failed");
        }

        result
    }

    /// Releases the underlying transport.
    ///
    /// Closing an already closed channel does nothing.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("channel closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

fn transport_endpoint(
    config: &ClientConfig,
) -> Result<tonic::transport::Endpoint, ConnectionError> {
    let endpoint = tonic::transport::Endpoint::from_shared(config.endpoint.uri()).map_err(
        |source| ConnectionError::InvalidEndpoint {
            endpoint: config.endpoint.to_string(),
            source,
        },
    )?;

    Ok(endpoint.connect_timeout(config.connect_timeout()))
}

fn build_request(
    data: &str,
    headers: &[(String, String)],
) -> Result<tonic::Request<ReverseRequest>, RpcError> {
    let mut request = tonic::Request::new(ReverseRequest {
        data: data.to_string(),
    });
    for (k, v) in headers {
        let key = MetadataKey::from_str(k).map_err(|e: InvalidMetadataKey| {
            RpcError::InvalidMetadataKey {
                key: k.clone(),
                reason: e.to_string(),
            }
        })?;
        let val = MetadataValue::from_str(v).map_err(|e: InvalidMetadataValue| {
            RpcError::InvalidMetadataValue {
                key: k.clone(),
                reason: e.to_string(),
            }
        })?;
        request.metadata_mut().insert(key, val);
    }
    Ok(request)
}
