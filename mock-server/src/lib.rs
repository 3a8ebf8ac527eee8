use std::{
    collections::HashSet,
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const NEWSLETTER_OWNER: &str = "NewsletterOficial";

/// Session accepted by authenticated routes in the seeded store.
pub const SEED_SESSION_TOKEN: &str = "mock-session-token";

pub const MAX_PER_PAGE: u32 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub status: String,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: Option<String>,
    pub deleted_at: Option<String>,
    pub owner_username: String,
    pub tabcoins: i64,
    pub tabcoins_credit: i64,
    pub tabcoins_debit: i64,
    pub children_deep_count: u32,
}

impl Content {
    /// List endpoints leave the markdown body out.
    fn summary(&self) -> Content {
        Content {
            body: None,
            ..self.clone()
        }
    }
}

#[derive(Default)]
pub struct Store {
    pub contents: Vec<Content>,
    pub sessions: HashSet<String>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub strategy: Option<String>,
}

#[derive(Deserialize)]
pub struct TabcoinsInput {
    pub transaction_type: String,
}

pub fn app() -> Router {
    app_with_store(seed())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/contents", get(list_contents))
        .route("/contents/{owner}", get(list_owner_contents))
        .route("/contents/{owner}/{slug}", get(get_content))
        .route("/contents/{owner}/{slug}/children", get(get_children))
        .route("/contents/{owner}/{slug}/tabcoins", post(post_tabcoins))
        .route("/sessions", delete(delete_session))
        .route("/faults/malformed", post(malformed).get(malformed))
        .with_state(db);
    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn(log_request))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    tracing::info!(%method, %uri, status = response.status().as_u16(), "handled request");
    response
}

/// Error body in the API's shape.
pub fn api_error(status: StatusCode, name: &str, message: &str, action: &str) -> Response {
    let body = json!({
        "name": name,
        "message": message,
        "action": action,
        "status_code": status.as_u16(),
        "error_id": Uuid::new_v4(),
        "request_id": Uuid::new_v4(),
    });
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    api_error(
        StatusCode::NOT_FOUND,
        "NotFoundError",
        "O conteúdo informado não foi encontrado no sistema.",
        "Verifique se o \"slug\" está digitado corretamente.",
    )
}

fn forbidden() -> Response {
    api_error(
        StatusCode::FORBIDDEN,
        "ForbiddenError",
        "Usuário não pode executar esta operação.",
        "Verifique se este usuário possui a feature necessária.",
    )
}

fn validation_error(message: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        "ValidationError",
        message,
        "Ajuste os dados enviados e tente novamente.",
    )
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "session_id")
        .map(|(_, value)| value.to_string())
}

fn paginate(mut items: Vec<Content>, query: &ListQuery) -> Result<Vec<Content>, Response> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(30);
    if page < 1 {
        return Err(validation_error("\"page\" deve possuir um valor mínimo de 1."));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(validation_error("\"per_page\" deve estar entre 1 e 100."));
    }
    match query.strategy.as_deref().unwrap_or("relevant") {
        "new" => items.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        "old" => items.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        "relevant" => items.sort_by(|a, b| b.tabcoins.cmp(&a.tabcoins)),
        _ => {
            return Err(validation_error(
                "\"strategy\" deve possuir um dos seguintes valores: \"new\", \"old\" ou \"relevant\".",
            ))
        }
    }
    // Pages past the end come back empty.
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    Ok(items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(|c| c.summary())
        .collect())
}

async fn list_contents(State(db): State<Db>, Query(query): Query<ListQuery>) -> Response {
    let store = db.read().await;
    let roots: Vec<Content> = store
        .contents
        .iter()
        .filter(|c| c.parent_id.is_none())
        .cloned()
        .collect();
    match paginate(roots, &query) {
        Ok(items) => Json(items).into_response(),
        Err(response) => response,
    }
}

async fn list_owner_contents(
    State(db): State<Db>,
    Path(owner): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let store = db.read().await;
    let owned: Vec<Content> = store
        .contents
        .iter()
        .filter(|c| c.parent_id.is_none() && c.owner_username == owner)
        .cloned()
        .collect();
    match paginate(owned, &query) {
        Ok(items) => Json(items).into_response(),
        Err(response) => response,
    }
}

fn find<'a>(store: &'a Store, owner: &str, slug: &str) -> Option<&'a Content> {
    store
        .contents
        .iter()
        .find(|c| c.owner_username == owner && c.slug == slug)
}

async fn get_content(
    State(db): State<Db>,
    Path((owner, slug)): Path<(String, String)>,
) -> Response {
    let store = db.read().await;
    match find(&store, &owner, &slug) {
        Some(content) => Json(content.clone()).into_response(),
        None => not_found(),
    }
}

async fn get_children(
    State(db): State<Db>,
    Path((owner, slug)): Path<(String, String)>,
) -> Response {
    let store = db.read().await;
    let Some(parent) = find(&store, &owner, &slug) else {
        return not_found();
    };
    let children: Vec<Content> = store
        .contents
        .iter()
        .filter(|c| c.parent_id == Some(parent.id))
        .cloned()
        .collect();
    Json(children).into_response()
}

async fn post_tabcoins(
    State(db): State<Db>,
    Path((owner, slug)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<TabcoinsInput>,
) -> Response {
    let mut store = db.write().await;
    if !session_token(&headers).is_some_and(|token| store.sessions.contains(&token)) {
        return forbidden();
    }
    let delta = match input.transaction_type.as_str() {
        "credit" => 1,
        "debit" => -1,
        _ => {
            return validation_error(
                "\"transaction_type\" deve possuir um dos seguintes valores: \"credit\" ou \"debit\".",
            )
        }
    };
    let Some(target) = store
        .contents
        .iter_mut()
        .find(|c| c.owner_username == owner && c.slug == slug)
    else {
        return not_found();
    };
    target.tabcoins += delta;
    if delta > 0 {
        target.tabcoins_credit += 1;
    } else {
        target.tabcoins_debit -= 1;
    }
    let body = json!({
        "tabcoins": target.tabcoins,
        "tabcoins_credit": target.tabcoins_credit,
        "tabcoins_debit": target.tabcoins_debit,
    });
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_session(State(db): State<Db>, headers: HeaderMap) -> Response {
    let mut store = db.write().await;
    if !session_token(&headers).is_some_and(|token| store.sessions.remove(&token)) {
        return forbidden();
    }
    Json(json!({ "id": Uuid::new_v4(), "expires_at": "1970-01-01T00:00:00.000Z" })).into_response()
}

/// Imitates a proxy answering in place of the API.
async fn malformed() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body><h1>502 Bad Gateway</h1></body></html>",
    )
        .into_response()
}

fn content(n: u128, owner: &str, slug: &str, title: Option<&str>, tabcoins: i64, day: u32) -> Content {
    let timestamp = format!("2024-01-{day:02}T12:00:00.000Z");
    let owner_id = match owner {
        "alice" => 0xa1,
        "bob" => 0xb0,
        NEWSLETTER_OWNER => 0xee,
        _ => 0xff,
    };
    Content {
        id: Uuid::from_u128(n),
        owner_id: Uuid::from_u128(owner_id),
        parent_id: None,
        slug: slug.to_string(),
        title: title.map(str::to_string),
        body: Some(format!("Conteúdo de {slug}.")),
        status: "published".to_string(),
        source_url: None,
        created_at: timestamp.clone(),
        updated_at: timestamp.clone(),
        published_at: Some(timestamp),
        deleted_at: None,
        owner_username: owner.to_string(),
        tabcoins,
        tabcoins_credit: tabcoins.max(0),
        tabcoins_debit: 0,
        children_deep_count: 0,
    }
}

/// Store with twelve posts, three newsletter editions and two comments on
/// `alice/post-1`.
pub fn seed() -> Store {
    let mut contents = Vec::new();
    for i in 1..=12u32 {
        let owner = if i % 2 == 0 { "bob" } else { "alice" };
        let slug = format!("post-{i}");
        let title = format!("Post {i}");
        contents.push(content(i as u128, owner, &slug, Some(&title), (i % 5) as i64 + 1, i));
    }
    for i in 1..=3u32 {
        let slug = format!("edicao-{i}");
        let title = format!("Newsletter edição {i}");
        contents.push(content(100 + i as u128, NEWSLETTER_OWNER, &slug, Some(&title), 10, 20 + i));
    }

    let parent_id = Uuid::from_u128(1);
    for (n, owner) in [(201u128, "bob"), (202u128, "alice")] {
        let mut reply = content(n, owner, &format!("reply-{n}"), None, 0, 15);
        reply.parent_id = Some(parent_id);
        contents.push(reply);
    }
    if let Some(parent) = contents.iter_mut().find(|c| c.id == parent_id) {
        parent.children_deep_count = 2;
    }

    let mut sessions = HashSet::new();
    sessions.insert(SEED_SESSION_TOKEN.to_string());
    Store { contents, sessions }
}
