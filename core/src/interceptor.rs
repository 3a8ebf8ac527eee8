//! Outgoing request interceptors.
//!
//! # Design
//! An interceptor is a total async transform `HttpRequest -> HttpRequest`.
//! The chain is a left fold over a slice: interceptor `i + 1` sees exactly
//! what interceptor `i` returned. There is no shared mutable request, and the
//! slice itself is never modified.
//!
//! The client puts its default interceptors first, so a caller interceptor
//! can rely on headers like `Content-Type` already being present.

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::HttpRequest;

/// Shared handle to an interceptor.
pub type InterceptorRef = Arc<dyn Interceptor>;

#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn intercept(&self, request: HttpRequest) -> HttpRequest;

    /// Name used in trace logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Applies interceptors in order.
pub struct InterceptorChain;

impl InterceptorChain {
    pub async fn apply(mut request: HttpRequest, interceptors: &[InterceptorRef]) -> HttpRequest {
        for (index, interceptor) in interceptors.iter().enumerate() {
            tracing::trace!(index, interceptor = interceptor.name(), "applying interceptor");
            request = interceptor.intercept(request).await;
        }
        request
    }
}

/// Sets `Content-Type: application/json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeInterceptor;

#[async_trait]
impl Interceptor for ContentTypeInterceptor {
    async fn intercept(&self, request: HttpRequest) -> HttpRequest {
        request.with_header("Content-Type", "application/json")
    }

    fn name(&self) -> &str {
        "content-type"
    }
}

/// Sets `Accept: application/json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptInterceptor;

#[async_trait]
impl Interceptor for AcceptInterceptor {
    async fn intercept(&self, request: HttpRequest) -> HttpRequest {
        request.with_header("Accept", "application/json")
    }

    fn name(&self) -> &str {
        "accept"
    }
}

/// Sets one header to a fixed value.
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: String,
    value: String,
}

impl HeaderInterceptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl Interceptor for HeaderInterceptor {
    async fn intercept(&self, request: HttpRequest) -> HttpRequest {
        request.with_header(&self.name, &self.value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Attaches the API session cookie used by authenticated routes.
#[derive(Clone)]
pub struct SessionInterceptor {
    token: String,
}

impl SessionInterceptor {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for SessionInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionInterceptor").finish_non_exhaustive()
    }
}

#[async_trait]
impl Interceptor for SessionInterceptor {
    async fn intercept(&self, request: HttpRequest) -> HttpRequest {
        let cookie = format!("session_id={}", self.token);
        request.with_header("Cookie", &cookie)
    }

    fn name(&self) -> &str {
        "session"
    }
}

/// Wraps a synchronous closure.
pub struct FnInterceptor<F> {
    f: F,
}

impl<F> FnInterceptor<F>
where
    F: Fn(HttpRequest) -> HttpRequest + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Interceptor for FnInterceptor<F>
where
    F: Fn(HttpRequest) -> HttpRequest + Send + Sync,
{
    async fn intercept(&self, request: HttpRequest) -> HttpRequest {
        (self.f)(request)
    }
}

/// The interceptors every client call starts with.
pub fn default_interceptors() -> Vec<InterceptorRef> {
    vec![Arc::new(ContentTypeInterceptor), Arc::new(AcceptInterceptor)]
}
