//! HTTP handlers for the sellers resource.
//!
//! Every response, success or failure, uses the `http_common::Envelope`
//! wrapper. Malformed requests are rejected before the repository is called.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use domain::{NewSeller, RepositoryError, Seller, SellerId, SellerRepository};
use http_common::Envelope;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

const MSG_SELLER_NOT_FOUND: &str = "seller not found";

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn SellerRepository>,
}

/// Request body for creating a seller. Absent fields decode as empty strings.
#[derive(Deserialize)]
struct SaveSellerReq {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct SellerOut {
    id: SellerId,
    first_name: String,
    last_name: String,
    email: String,
}

impl From<Seller> for SellerOut {
    fn from(s: Seller) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
        }
    }
}

type SellerResponse = (StatusCode, Json<Envelope<SellerOut>>);

fn bad_request() -> SellerResponse {
    (StatusCode::BAD_REQUEST, Json(Envelope::bad_request()))
}

fn internal_error() -> SellerResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(Envelope::internal_error()))
}

/// Routes for the sellers resource.
///
/// `GET /sellers/` is mounted so a request without an id gets the same
/// envelope as a malformed one.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sellers", post(save_seller))
        .route("/sellers/", get(get_seller).post(save_seller))
        .route("/sellers/:id", get(get_seller))
        .with_state(state)
}

async fn get_seller(State(state): State<AppState>, uri: Uri) -> SellerResponse {
    let Some(id_param) = http_common::path_last_param(uri.path()) else {
        warn!("missing seller id in path");
        return bad_request();
    };
    let Ok(id) = id_param.parse::<SellerId>() else {
        warn!(id = %id_param, "seller id is not an integer");
        return bad_request();
    };

    match state.repo.get_by_id(id) {
        Ok(seller) => {
            info!(id, "get seller ok");
            (StatusCode::OK, Json(Envelope::success(seller.into())))
        }
        Err(RepositoryError::NotFound) => {
            warn!(id, "seller 404");
            (
                StatusCode::NOT_FOUND,
                Json(Envelope::failure(MSG_SELLER_NOT_FOUND)),
            )
        }
        Err(e) => {
            error!(id, err = ?e, "get seller error");
            internal_error()
        }
    }
}

async fn save_seller(
    State(state): State<AppState>,
    payload: Result<Json<SaveSellerReq>, JsonRejection>,
) -> SellerResponse {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "invalid seller body");
            return bad_request();
        }
    };

    let new_seller = NewSeller {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };
    match state.repo.save(new_seller) {
        Ok(seller) => {
            info!(id = seller.id, "create seller ok");
            (StatusCode::CREATED, Json(Envelope::success(seller.into())))
        }
        Err(e) => {
            error!(err = ?e, "create seller error");
            internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use domain::adapters::memory_storage::InMemoryStorage;
    use domain::adapters::repository_mock::RepositoryMock;
    use domain::adapters::storage_mock::{StorageCalls, StorageMock};
    use domain::repository::DefaultSellerRepository;
    use domain::{Sellers, StorageError};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    const JOHN_BODY: &str = r#"{"first_name":"John","last_name":"Doe","email":"johndoe@gmail.com"}"#;

    fn john(id: SellerId) -> Seller {
        Seller {
            id,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "johndoe@gmail.com".into(),
        }
    }

    fn app_with_repo<R: SellerRepository + 'static>(repo: R) -> Router {
        router(AppState {
            repo: Arc::new(repo),
        })
    }

    fn app_with_storage(st: &Arc<StorageMock>) -> Router {
        app_with_repo(DefaultSellerRepository::new(Arc::clone(st)))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sellers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn get_existing_seller() {
        let st = Arc::new(StorageMock::new().with_read(|| Ok([(1, john(1))].into_iter().collect())));

        let (status, body) = send(app_with_storage(&st), get("/sellers/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message":"success","data":{"id":1,"first_name":"John","last_name":"Doe","email":"johndoe@gmail.com"},"error":false})
        );
        assert_eq!(st.calls(), StorageCalls { read: 1, write: 0 });
    }

    #[tokio::test]
    async fn get_missing_seller_is_404() {
        let st = Arc::new(StorageMock::new().with_read(|| Ok(Sellers::new())));

        let (status, body) = send(app_with_storage(&st), get("/sellers/1")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message":"seller not found","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls { read: 1, write: 0 });
    }

    #[tokio::test]
    async fn get_with_storage_failure_is_500() {
        let st = Arc::new(
            StorageMock::new().with_read(|| Err(StorageError::Internal("down".into()))),
        );

        let (status, body) = send(app_with_storage(&st), get("/sellers/1")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message":"internal error","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls { read: 1, write: 0 });
    }

    #[tokio::test]
    async fn get_without_id_is_400() {
        let st = Arc::new(StorageMock::new());

        let (status, body) = send(app_with_storage(&st), get("/sellers/")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message":"bad request","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls::default());
    }

    #[tokio::test]
    async fn get_with_non_integer_id_is_400() {
        let st = Arc::new(StorageMock::new());

        let (status, body) = send(app_with_storage(&st), get("/sellers/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message":"bad request","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls::default());
    }

    #[tokio::test]
    async fn get_passes_parsed_id_to_repository() {
        let repo = Arc::new(RepositoryMock::new().with_get_by_id(|id| {
            assert_eq!(id, -7);
            Err(RepositoryError::NotFound)
        }));

        let (status, _) = send(app_with_repo(Arc::clone(&repo)), get("/sellers/-7")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(repo.calls().get_by_id, 1);
    }

    #[tokio::test]
    async fn save_seller_is_201_with_assigned_id() {
        let st = Arc::new(
            StorageMock::new()
                .with_read(|| Ok(Sellers::new()))
                .with_write(|_| Ok(())),
        );

        let (status, body) = send(app_with_storage(&st), post_json(JOHN_BODY)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"message":"success","data":{"id":1,"first_name":"John","last_name":"Doe","email":"johndoe@gmail.com"},"error":false})
        );
        assert_eq!(st.calls(), StorageCalls { read: 1, write: 1 });
    }

    #[tokio::test]
    async fn save_with_empty_body_is_400() {
        let st = Arc::new(StorageMock::new());
        let req = Request::builder()
            .method("POST")
            .uri("/sellers")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app_with_storage(&st), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message":"bad request","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls::default());
    }

    #[tokio::test]
    async fn save_with_malformed_json_is_400() {
        let st = Arc::new(StorageMock::new());

        let (status, body) = send(app_with_storage(&st), post_json("{\"first_name\":")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message":"bad request","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls::default());
    }

    #[tokio::test]
    async fn save_with_write_failure_is_500() {
        let st = Arc::new(
            StorageMock::new()
                .with_read(|| Ok(Sellers::new()))
                .with_write(|_| Err(StorageError::Internal("full".into()))),
        );

        let (status, body) = send(app_with_storage(&st), post_json(JOHN_BODY)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message":"internal error","data":null,"error":true}));
        assert_eq!(st.calls(), StorageCalls { read: 1, write: 1 });
    }

    #[tokio::test]
    async fn save_with_missing_fields_uses_empty_strings() {
        let repo = Arc::new(RepositoryMock::new());

        let (status, body) = send(app_with_repo(Arc::clone(&repo)), post_json("{}")).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["data"],
            json!({"id":1,"first_name":"","last_name":"","email":""})
        );
        assert_eq!(repo.calls().save, 1);
    }

    #[tokio::test]
    async fn create_then_fetch_with_in_memory_storage() {
        let app = app_with_repo(DefaultSellerRepository::new(InMemoryStorage::default()));

        let (status, created) = send(app.clone(), post_json(JOHN_BODY)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, fetched) = send(app.clone(), get(&format!("/sellers/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"], created["data"]);

        let (_, second) = send(app, post_json(JOHN_BODY)).await;
        assert_eq!(second["data"]["id"], json!(id + 1));
    }
}
