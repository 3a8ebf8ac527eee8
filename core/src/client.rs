//! The client facade: build, intercept, send, decode.
//!
//! # Design
//! `NetworkClient` owns a `RequestBuilder`, a `Transport` and its default
//! interceptors, all passed in at construction. Every call runs the same
//! four steps in order and returns one of the three result variants; none of
//! them panics or returns early with a Rust error.
//!
//! - A build failure returns `TransportError::internal()` without touching
//!   the network.
//! - A transport failure returns its transport error without decoding.
//! - Otherwise the decoder decides.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::builder::RequestBuilder;
use crate::config::ClientConfig;
use crate::decoder::ResponseDecoder;
use crate::endpoint::Endpoint;
use crate::error::{ConfigError, TransportError};
use crate::http::{HttpMethod, HttpResponse};
use crate::interceptor::{default_interceptors, ContentTypeInterceptor, InterceptorRef};
use crate::params::Parameters;
use crate::result::{ApiResult, SimpleResult};
use crate::transport::{ReqwestTransport, Transport};

/// Typed HTTP client over any `Transport`.
///
/// Cheap to share: wrap it in an `Arc` and call it from as many tasks as
/// needed. Calls do not coordinate with each other.
pub struct NetworkClient<T> {
    builder: RequestBuilder,
    transport: T,
    default_interceptors: Vec<InterceptorRef>,
}

impl NetworkClient<ReqwestTransport> {
    /// Client over `reqwest` configured from `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> NetworkClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(config.base_url),
            transport,
            default_interceptors: default_interceptors(),
        }
    }

    /// Replace the defaults that run ahead of every call's own list.
    ///
    /// `ContentTypeInterceptor` always stays first; `interceptors` run after
    /// it.
    pub fn with_default_interceptors(mut self, interceptors: Vec<InterceptorRef>) -> Self {
        let content_type: InterceptorRef = Arc::new(ContentTypeInterceptor);
        self.default_interceptors = std::iter::once(content_type).chain(interceptors).collect();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send a request and decode the body as `R`, falling back to `E`.
    ///
    /// `R` and `E` must not both accept the same body; see
    /// [`ResponseDecoder`].
    pub async fn request<R, E>(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        params: &Parameters,
        interceptors: &[InterceptorRef],
    ) -> ApiResult<R, E>
    where
        R: DeserializeOwned,
        E: DeserializeOwned,
    {
        match self.execute(endpoint, method, params, interceptors).await {
            Ok(response) => {
                let result = ResponseDecoder::decode::<R, E>(&response);
                if result.is_domain_error() {
                    tracing::debug!(status = response.status, "API returned an error body");
                }
                result
            }
            Err(err) => ApiResult::TransportError(err),
        }
    }

    /// Send a request that carries no success payload.
    pub async fn request_simple<E>(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        params: &Parameters,
        interceptors: &[InterceptorRef],
    ) -> SimpleResult<E>
    where
        E: DeserializeOwned,
    {
        match self.execute(endpoint, method, params, interceptors).await {
            Ok(response) => ResponseDecoder::decode_simple::<E>(&response),
            Err(err) => SimpleResult::TransportError(err),
        }
    }

    async fn execute(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        params: &Parameters,
        interceptors: &[InterceptorRef],
    ) -> Result<HttpResponse, TransportError> {
        let chain: Vec<InterceptorRef> = self
            .default_interceptors
            .iter()
            .chain(interceptors)
            .map(Arc::clone)
            .collect();

        let request = self
            .builder
            .build(endpoint, method, params, &chain)
            .await
            .map_err(|e| {
                tracing::warn!(path = %endpoint.path(), error = %e, "request build failed");
                TransportError::from(e)
            })?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(path = %endpoint.path(), error = %e, "transport failed");
            TransportError::from(e)
        })?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }
}
