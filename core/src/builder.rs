//! Turns an endpoint, method and parameters into a ready-to-send request.

use url::Url;

use crate::endpoint::Endpoint;
use crate::error::BuildError;
use crate::http::{HttpMethod, HttpRequest};
use crate::interceptor::{InterceptorChain, InterceptorRef};
use crate::params::{to_json_body, to_query_items, Parameters};

/// Resolves endpoints against a fixed base URL.
///
/// Holds no state besides the base URL, so one builder can serve any number
/// of concurrent calls.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
}

impl RequestBuilder {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `endpoint` to an absolute URL.
    ///
    /// Segments are appended to the base path and percent-encoded one by one.
    /// Fails for bases that cannot carry a path (`mailto:`, `data:`) and for
    /// `.` or `..` segments, which would otherwise be dropped from the path.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, BuildError> {
        let path = endpoint.segments();
        if let Some(dot) = path.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(BuildError::InvalidUrl(format!(
                "path segment {dot:?} in {}",
                endpoint.path()
            )));
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                BuildError::InvalidUrl(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty().extend(path);
        }
        Ok(url)
    }

    /// Assemble the request and run it through `interceptors`, in order.
    ///
    /// Query methods put `params` in the URL, body methods serialize them as a
    /// JSON object. No I/O happens here.
    pub async fn build(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        params: &Parameters,
        interceptors: &[InterceptorRef],
    ) -> Result<HttpRequest, BuildError> {
        let mut url = self.url_for(endpoint)?;
        let mut body = None;

        if method.uses_query() {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(to_query_items(params));
            }
        } else if method.uses_body() {
            body = Some(to_json_body(params)?);
        }

        let request = HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body,
        };
        Ok(InterceptorChain::apply(request, interceptors).await)
    }
}
