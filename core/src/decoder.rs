//! Classifies a raw response into success, domain error, or transport error.
//!
//! # Design
//! The API does not tag its bodies with a result kind, so the decoder tries
//! the declared shapes in a fixed order:
//!
//! 1. the body deserializes as `R` → `Success`
//! 2. the body deserializes as `E` → `DomainError`
//! 3. otherwise → `TransportError` with the response status and the parse
//!    failure message
//!
//! This only works if no payload can satisfy both `R` and `E`. Call sites
//! pick the two types; `is_ambiguous` lets tests check a pair against sample
//! bodies, and debug builds log a warning when a decoded success would also
//! have passed as `E`.
//!
//! Decoding reads the response and nothing else, so it is idempotent.

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::HttpResponse;
use crate::result::{ApiResult, SimpleResult};

pub struct ResponseDecoder;

impl ResponseDecoder {
    pub fn decode<R, E>(response: &HttpResponse) -> ApiResult<R, E>
    where
        R: DeserializeOwned,
        E: DeserializeOwned,
    {
        let success_err = match serde_json::from_slice::<R>(&response.body) {
            Ok(payload) => {
                if cfg!(debug_assertions) && serde_json::from_slice::<E>(&response.body).is_ok() {
                    tracing::warn!(
                        status = response.status,
                        url = %response.request.url,
                        "response body matches both the success and the error shape"
                    );
                }
                return ApiResult::Success(payload);
            }
            Err(e) => e,
        };

        match serde_json::from_slice::<E>(&response.body) {
            Ok(err) => ApiResult::DomainError(err),
            Err(_) => {
                tracing::warn!(
                    status = response.status,
                    url = %response.request.url,
                    error = %success_err,
                    "response matched neither declared shape"
                );
                ApiResult::TransportError(TransportError::new(
                    response.status,
                    success_err.to_string(),
                ))
            }
        }
    }

    /// Like `decode`, for calls without a success payload: any 2xx status is
    /// a success and the body is ignored.
    pub fn decode_simple<E>(response: &HttpResponse) -> SimpleResult<E>
    where
        E: DeserializeOwned,
    {
        if response.is_success() {
            return SimpleResult::Success;
        }
        match serde_json::from_slice::<E>(&response.body) {
            Ok(err) => SimpleResult::DomainError(err),
            Err(e) => {
                tracing::warn!(
                    status = response.status,
                    url = %response.request.url,
                    error = %e,
                    "error response did not match the declared error shape"
                );
                SimpleResult::TransportError(TransportError::new(response.status, e.to_string()))
            }
        }
    }

    /// Whether `body` deserializes as both `R` and `E`.
    pub fn is_ambiguous<R, E>(body: &[u8]) -> bool
    where
        R: DeserializeOwned,
        E: DeserializeOwned,
    {
        serde_json::from_slice::<R>(body).is_ok() && serde_json::from_slice::<E>(body).is_ok()
    }
}
