//! Typed calls for TabNews contents, used by the app's screens.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::client::NetworkClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::interceptor::{InterceptorRef, SessionInterceptor};
use crate::params::Parameters;
use crate::result::ApiResult;
use crate::transport::Transport;
use crate::types::{Content, Strategy, TabcoinsBalance, TransactionType};

pub type ContentResult<T> = ApiResult<T, ApiError>;

/// Pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
    pub strategy: Strategy,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 30,
            strategy: Strategy::Relevant,
        }
    }
}

impl Page {
    pub fn new(page: u32, per_page: u32, strategy: Strategy) -> Self {
        Self {
            page,
            per_page,
            strategy,
        }
    }

    pub fn to_params(self) -> Parameters {
        Parameters::new()
            .with("page", self.page)
            .with("per_page", self.per_page)
            .with("strategy", self.strategy.as_str())
    }
}

pub struct ContentService<T> {
    client: Arc<NetworkClient<T>>,
}

impl<T> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: Transport> ContentService<T> {
    pub fn new(client: Arc<NetworkClient<T>>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &NetworkClient<T> {
        &self.client
    }

    pub async fn list_contents(&self, page: Page) -> ContentResult<Vec<Content>> {
        self.get(&Endpoint::Contents, &page.to_params()).await
    }

    pub async fn get_content(&self, owner: &str, slug: &str) -> ContentResult<Content> {
        self.get(&Endpoint::content(owner, slug), &Parameters::new()).await
    }

    /// Comments under a content, as a flat list.
    pub async fn get_children(&self, owner: &str, slug: &str) -> ContentResult<Vec<Content>> {
        self.get(&Endpoint::children(owner, slug), &Parameters::new()).await
    }

    pub async fn list_newsletters(&self, page: Page) -> ContentResult<Vec<Content>> {
        self.get(&Endpoint::Newsletters, &page.to_params()).await
    }

    pub async fn get_newsletter(&self, slug: &str) -> ContentResult<Content> {
        self.get(&Endpoint::newsletter(slug), &Parameters::new()).await
    }

    /// Fetch several contents at once.
    ///
    /// Requests run concurrently and may complete in any order; the returned
    /// vector is indexed like `keys`.
    pub async fn get_contents(&self, keys: &[(String, String)]) -> Vec<ContentResult<Content>> {
        join_all(keys.iter().map(|(owner, slug)| self.get_content(owner, slug))).await
    }

    /// Credit or debit TabCoins on a content. Needs a session.
    pub async fn vote(
        &self,
        owner: &str,
        slug: &str,
        transaction: TransactionType,
        session_token: &str,
    ) -> ContentResult<TabcoinsBalance> {
        let params = Parameters::new().with("transaction_type", transaction.as_str());
        let session: InterceptorRef = Arc::new(SessionInterceptor::new(session_token));
        self.client
            .request(
                &Endpoint::tabcoins(owner, slug),
                HttpMethod::Post,
                &params,
                &[session],
            )
            .await
    }

    async fn get<R>(&self, endpoint: &Endpoint, params: &Parameters) -> ContentResult<R>
    where
        R: serde::de::DeserializeOwned,
    {
        self.client
            .request(endpoint, HttpMethod::Get, params, &[])
            .await
    }
}
