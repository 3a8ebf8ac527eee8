//! The three-way outcome of every client call.
//!
//! # Design
//! `ApiResult` is deliberately not a `std::result::Result`: a domain error is
//! an expected answer from the API, not a failure of the client, and callers
//! usually branch on all three cases at once. `into_result` bridges to `?`
//! style code when that reads better.

use crate::error::TransportError;

/// Outcome of a call that expects a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<R, E> {
    Success(R),
    DomainError(E),
    TransportError(TransportError),
}

/// Outcome of a call that expects no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleResult<E> {
    Success,
    DomainError(E),
    TransportError(TransportError),
}

/// The two non-success outcomes, for use with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    Domain(E),
    Transport(TransportError),
}

impl<E: std::fmt::Display> std::fmt::Display for Failure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Domain(e) => write!(f, "API error: {e}"),
            Failure::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for Failure<E> {}

impl<R, E> ApiResult<R, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(self, ApiResult::DomainError(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, ApiResult::TransportError(_))
    }

    pub fn success(self) -> Option<R> {
        match self {
            ApiResult::Success(r) => Some(r),
            _ => None,
        }
    }

    pub fn domain_error(self) -> Option<E> {
        match self {
            ApiResult::DomainError(e) => Some(e),
            _ => None,
        }
    }

    pub fn transport_error(self) -> Option<TransportError> {
        match self {
            ApiResult::TransportError(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(R) -> U>(self, f: F) -> ApiResult<U, E> {
        match self {
            ApiResult::Success(r) => ApiResult::Success(f(r)),
            ApiResult::DomainError(e) => ApiResult::DomainError(e),
            ApiResult::TransportError(e) => ApiResult::TransportError(e),
        }
    }

    /// Fall back to `default` on either failure, e.g. an empty list.
    pub fn unwrap_or(self, default: R) -> R {
        self.success().unwrap_or(default)
    }

    pub fn into_result(self) -> Result<R, Failure<E>> {
        match self {
            ApiResult::Success(r) => Ok(r),
            ApiResult::DomainError(e) => Err(Failure::Domain(e)),
            ApiResult::TransportError(e) => Err(Failure::Transport(e)),
        }
    }
}

impl<E> SimpleResult<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, SimpleResult::Success)
    }

    pub fn domain_error(self) -> Option<E> {
        match self {
            SimpleResult::DomainError(e) => Some(e),
            _ => None,
        }
    }

    pub fn transport_error(self) -> Option<TransportError> {
        match self {
            SimpleResult::TransportError(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<(), Failure<E>> {
        match self {
            SimpleResult::Success => Ok(()),
            SimpleResult::DomainError(e) => Err(Failure::Domain(e)),
            SimpleResult::TransportError(e) => Err(Failure::Transport(e)),
        }
    }
}

impl<R, E> From<TransportError> for ApiResult<R, E> {
    fn from(err: TransportError) -> Self {
        ApiResult::TransportError(err)
    }
}

impl<E> From<TransportError> for SimpleResult<E> {
    fn from(err: TransportError) -> Self {
        SimpleResult::TransportError(err)
    }
}
