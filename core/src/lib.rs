//! Typed async client core for the TabNews API.
//!
//! # Overview
//! Every call goes through the same pipeline:
//!
//! ```text
//! Endpoint + HttpMethod + Parameters
//!   -> RequestBuilder      (URL, query or JSON body)
//!   -> InterceptorChain    (defaults first, then the caller's, in order)
//!   -> Transport           (one network attempt)
//!   -> ResponseDecoder     (success type, then error type, then generic)
//!   -> ApiResult / SimpleResult
//! ```
//!
//! # Design
//! - `NetworkClient` never fails with a Rust error: callers always get one
//!   of `Success`, `DomainError` or `TransportError`.
//! - The transport is a trait so tests and hosts can bring their own I/O;
//!   `ReqwestTransport` is the default.
//! - Components are built explicitly and passed by value or `Arc`. There is
//!   no global registry.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod builder;
pub mod client;
pub mod config;
pub mod content;
pub mod decoder;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod params;
pub mod result;
pub mod transport;
pub mod types;

pub use builder::RequestBuilder;
pub use client::NetworkClient;
pub use config::ClientConfig;
pub use content::{ContentService, Page};
pub use decoder::ResponseDecoder;
pub use endpoint::Endpoint;
pub use error::{ApiError, BuildError, ConfigError, TransportError, TransportFailure};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{
    ContentTypeInterceptor, FnInterceptor, HeaderInterceptor, Interceptor, InterceptorChain,
    InterceptorRef, SessionInterceptor,
};
pub use params::Parameters;
pub use result::{ApiResult, Failure, SimpleResult};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Content, Strategy, TabcoinsBalance, TransactionType};
