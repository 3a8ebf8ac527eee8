//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `NetworkClient` and
//! `ContentService` over real HTTP through `ReqwestTransport`. Catches schema
//! drift between the core DTOs and the server's, and checks that each kind of
//! outcome survives the full pipeline.

use std::sync::Arc;

use tabnews_core::{
    ApiError, ApiResult, ClientConfig, Content, ContentService, Endpoint, HttpMethod,
    NetworkClient, Page, Parameters, ReqwestTransport, SessionInterceptor, SimpleResult,
    Strategy, TransactionType,
};

/// Start the mock server and return its API base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}/api/v1")
}

fn client(base_url: &str) -> NetworkClient<ReqwestTransport> {
    NetworkClient::from_config(ClientConfig::new(base_url).unwrap()).unwrap()
}

async fn service() -> ContentService<ReqwestTransport> {
    let base_url = start_server().await;
    ContentService::new(Arc::new(client(&base_url)))
}

#[tokio::test]
async fn list_first_page_of_relevant_contents() {
    let service = service().await;

    let result = service.list_contents(Page::new(1, 5, Strategy::Relevant)).await;
    let contents = result.success().expect("expected a list of contents");
    assert_eq!(contents.len(), 5);
    assert!(contents.iter().all(|c| c.body.is_none()));
    assert!(contents.windows(2).all(|w| w[0].tabcoins >= w[1].tabcoins));
}

#[tokio::test]
async fn missing_slug_is_domain_error() {
    let service = service().await;

    let result = service.get_content("alice", "does-not-exist").await;
    let err = result.domain_error().expect("expected an API error");
    assert_eq!(err.name, "NotFoundError");
    assert_eq!(err.status_code, 404);
    assert!(!err.error_id.is_empty());
}

#[tokio::test]
async fn invalid_listing_is_domain_error() {
    let base_url = start_server().await;
    let client = client(&base_url);

    let params = Parameters::new().with("page", 1).with("per_page", 500);
    let result: ApiResult<Vec<Content>, ApiError> = client
        .request(&Endpoint::Contents, HttpMethod::Get, &params, &[])
        .await;
    assert_eq!(result.domain_error().unwrap().name, "ValidationError");
}

#[tokio::test]
async fn unreachable_server_is_no_connectivity() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client(&format!("http://127.0.0.1:{port}/api/v1"));

    for method in HttpMethod::ALL {
        let result: ApiResult<Content, ApiError> = client
            .request(&Endpoint::content("alice", "post-1"), method, &Parameters::new(), &[])
            .await;
        let err = result.transport_error().expect("expected a transport error");
        assert_eq!(err.status_code, 503, "{method}");
        assert_eq!(err.error_message, "network.noInternetConnection", "{method}");
    }
}

#[tokio::test]
async fn malformed_body_keeps_status() {
    let base_url = start_server().await;
    let client = client(&base_url);

    let params = Parameters::new().with("title", "Hello").with("body", "World");
    let result: ApiResult<Content, ApiError> = client
        .request(
            &Endpoint::Custom("faults/malformed".to_string()),
            HttpMethod::Post,
            &params,
            &[],
        )
        .await;
    let err = result.transport_error().expect("expected a transport error");
    assert_eq!(err.status_code, 502);
}

#[tokio::test]
async fn content_detail_and_children() {
    let service = service().await;

    let content = service.get_content("alice", "post-1").await.success().unwrap();
    assert_eq!(content.slug, "post-1");
    assert!(content.body.is_some());
    assert_eq!(content.children_deep_count, 2);

    let children = service.get_children("alice", "post-1").await.success().unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.parent_id == Some(content.id)));
}

#[tokio::test]
async fn newsletters() {
    let service = service().await;

    let editions = service
        .list_newsletters(Page::new(1, 10, Strategy::New))
        .await
        .success()
        .unwrap();
    assert_eq!(editions.len(), 3);
    assert!(editions.iter().all(|c| c.owner_username == "NewsletterOficial"));

    let edition = service.get_newsletter("edicao-2").await.success().unwrap();
    assert_eq!(edition.title.as_deref(), Some("Newsletter edição 2"));
}

#[tokio::test]
async fn batch_results_follow_input_order() {
    let service = service().await;

    let keys: Vec<(String, String)> = [("bob", "post-4"), ("alice", "missing"), ("alice", "post-3")]
        .into_iter()
        .map(|(o, s)| (o.to_string(), s.to_string()))
        .collect();
    let results = service.get_contents(&keys).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].clone().success().unwrap().slug, "post-4");
    assert!(results[1].is_domain_error());
    assert_eq!(results[2].clone().success().unwrap().slug, "post-3");
}

#[tokio::test]
async fn vote_requires_session() {
    let service = service().await;

    let denied = service
        .vote("alice", "post-1", TransactionType::Credit, "not-a-session")
        .await;
    assert_eq!(denied.domain_error().unwrap().status_code, 403);

    let before = service.get_content("alice", "post-1").await.success().unwrap();
    let balance = service
        .vote("alice", "post-1", TransactionType::Credit, mock_server::SEED_SESSION_TOKEN)
        .await
        .success()
        .unwrap();
    assert_eq!(balance.tabcoins, before.tabcoins + 1);
}

#[tokio::test]
async fn logout_is_a_simple_request() {
    let base_url = start_server().await;
    let client = client(&base_url);
    let session: tabnews_core::InterceptorRef =
        Arc::new(SessionInterceptor::new(mock_server::SEED_SESSION_TOKEN));

    let first: SimpleResult<ApiError> = client
        .request_simple(
            &Endpoint::Custom("sessions".to_string()),
            HttpMethod::Delete,
            &Parameters::new(),
            &[session.clone()],
        )
        .await;
    assert!(first.is_success());

    let second: SimpleResult<ApiError> = client
        .request_simple(
            &Endpoint::Custom("sessions".to_string()),
            HttpMethod::Delete,
            &Parameters::new(),
            &[session],
        )
        .await;
    assert_eq!(second.domain_error().unwrap().status_code, 403);
}
