use crate::document::{Document, DocumentStatus};
use crate::engine::{MatchResult, NewDocument, SearchServer};
use crate::error::SearchError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Search server shared between request handlers. Adding documents takes the
/// write lock, queries share the read lock.
pub type SharedSearchServer = Arc<RwLock<SearchServer>>;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct BatchInsertRequest {
    pub documents: Vec<NewDocument>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub documents: Vec<Document>,
    pub total: usize,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub total_terms: usize,
    pub avg_docs_per_term: f64,
    pub stop_words: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self.0.downcast_ref::<SearchError>() {
            Some(SearchError::EmptyDocument { .. }) | Some(SearchError::MalformedQuery { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Some(SearchError::DuplicateId(_)) => StatusCode::CONFLICT,
            Some(SearchError::UnknownDocumentId(_)) => StatusCode::NOT_FOUND,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = format!("{:#}", self.0);
        if status.is_server_error() {
            tracing::error!("API error: {}", message);
        } else {
            tracing::debug!("rejected request: {}", message);
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn read_server(server: &SharedSearchServer) -> Result<RwLockReadGuard<'_, SearchServer>, AppError> {
    server
        .read()
        .map_err(|_| AppError(anyhow::anyhow!("search server lock poisoned")))
}

fn write_server(
    server: &SharedSearchServer,
) -> Result<RwLockWriteGuard<'_, SearchServer>, AppError> {
    server
        .write()
        .map_err(|_| AppError(anyhow::anyhow!("search server lock poisoned")))
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn add_document(
    State(server): State<SharedSearchServer>,
    Json(doc): Json<NewDocument>,
) -> Result<impl IntoResponse, AppError> {
    write_server(&server)?.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(format!("Document {} added", doc.id))),
    ))
}

async fn batch_add(
    State(server): State<SharedSearchServer>,
    Json(req): Json<BatchInsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    let added = write_server(&server)?.add_documents(req.documents)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(added))))
}

async fn search_documents(
    State(server): State<SharedSearchServer>,
    Query(req): Query<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = req.status.unwrap_or_default();
    let documents = read_server(&server)?.find_top_documents_by_status(&req.query, status)?;

    let response = SearchResponse {
        total: documents.len(),
        documents,
        query: req.query,
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn match_document(
    State(server): State<SharedSearchServer>,
    Path(id): Path<i32>,
    Query(req): Query<MatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let matched: MatchResult = read_server(&server)?.match_document(&req.query, id)?;
    Ok(Json(ApiResponse::success(matched)))
}

async fn get_stats(State(server): State<SharedSearchServer>) -> Result<impl IntoResponse, AppError> {
    let server = read_server(&server)?;
    let stats = server.stats();

    let response = StatsResponse {
        total_documents: stats.total_documents,
        total_terms: stats.total_terms,
        avg_docs_per_term: stats.avg_docs_per_term,
        stop_words: server.stop_words().len(),
    };

    Ok(Json(ApiResponse::success(response)))
}

// ========== Router ==========

pub fn create_router(server: SharedSearchServer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/documents", post(add_document))
        .route("/documents/batch", post(batch_add))
        .route("/documents/:id/match", get(match_document))
        .route("/search", get(search_documents))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn shared(server: SearchServer) -> SharedSearchServer {
        Arc::new(RwLock::new(server))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_search() {
        let server = shared(SearchServer::with_stop_words("in the"));
        let router = create_router(server.clone());

        let (status, _) = send(
            router.clone(),
            post_json(
                "/documents",
                json!({"id": 42, "text": "cat in the city", "ratings": [1, 2, 3]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(router, get_uri("/search?query=city%20-dog")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["documents"][0]["id"], 42);
        assert_eq!(body["data"]["documents"][0]["rating"], 2);
        assert_eq!(server.read().unwrap().get_document_count(), 1);
    }

    #[tokio::test]
    async fn test_search_by_status() {
        let router = create_router(shared(SearchServer::new()));
        let (status, body) = send(
            router.clone(),
            post_json(
                "/documents/batch",
                json!({"documents": [
                    {"id": 1, "text": "white cat", "status": "Banned"},
                    {"id": 2, "text": "black cat"}
                ]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"], 2);

        let (_, body) = send(router.clone(), get_uri("/search?query=cat&status=Banned")).await;
        assert_eq!(body["data"]["documents"][0]["id"], 1);
        assert_eq!(body["data"]["total"], 1);

        let (_, body) = send(router, get_uri("/search?query=cat")).await;
        assert_eq!(body["data"]["documents"][0]["id"], 2);
    }

    #[tokio::test]
    async fn test_errors_map_to_status_codes() {
        let mut server = SearchServer::new();
        server
            .add_document(1, "cat playing with cat", DocumentStatus::Actual, &[1])
            .unwrap();
        let router = create_router(shared(server));

        let (status, body) = send(
            router.clone(),
            post_json("/documents", json!({"id": 1, "text": "dog"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (status, _) = send(
            router.clone(),
            post_json("/documents", json!({"id": 2, "text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(router.clone(), get_uri("/search?query=cat%20-")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(router, get_uri("/documents/9/match?query=cat")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_match_and_stats() {
        let mut server = SearchServer::with_stop_words("with");
        server
            .add_document(1, "cat playing with cat", DocumentStatus::Irrelevant, &[1])
            .unwrap();
        let router = create_router(shared(server));

        let (status, body) = send(
            router.clone(),
            get_uri("/documents/1/match?query=playing%20cat%20dog"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["words"], json!(["cat", "playing"]));
        assert_eq!(body["data"]["status"], "IRRELEVANT");

        let (_, body) = send(router, get_uri("/stats")).await;
        assert_eq!(body["data"]["total_documents"], 1);
        assert_eq!(body["data"]["total_terms"], 2);
        assert_eq!(body["data"]["stop_words"], 1);
    }
}
