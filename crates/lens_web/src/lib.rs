use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use lens_core::Result;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/feed", get(handlers::get_feed))
        .route("/api/search", get(handlers::search))
        .route("/api/sources", get(handlers::list_sources))
        .route("/api/sources/:id/toggle", post(handlers::toggle_source))
        .route("/admin", get(handlers::admin_challenge))
        .route("/api/admin/unlock", post(handlers::admin_unlock))
        .route("/api/admin/apply", post(handlers::admin_apply))
        .route("/api/accounts", get(handlers::list_accounts))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/interact", post(handlers::record_interaction))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use lens_core::{Article, Category, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use lens_inference::DummyModel;
    use lens_storage::MemoryStore;
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = AppState::build(Arc::new(MemoryStore::new()), Arc::new(DummyModel))
            .await
            .unwrap();
        create_app(state).await
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_feed_endpoint_renders_hero_and_grid() {
        let app = app().await;
        let response = app.oneshot(get("/api/feed?category=sports")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["heading"], "More in Sports");
        assert_eq!(body["is_searching"], false);
        assert!(body["hero"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let app = app().await;
        let response = app.oneshot(get("/api/feed?category=weather")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_endpoint_suppresses_hero() {
        let app = app().await;
        let response = app.oneshot(get("/api/search?q=melamchi")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["heading"], "Search Results");
        assert!(body["hero"].is_null());
    }

    #[tokio::test]
    async fn test_toggle_requires_admin_unlock() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(post_json("/api/sources/kantipur/toggle", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(post_json("/api/admin/unlock", "{\"key\":\"wrong\"}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_json("/api/admin/unlock", "{\"key\":\"nepal2081\"}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json("/api/sources/kantipur/toggle", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["enabled"], false);

        let response = app
            .oneshot(post_json("/api/sources/bbc/toggle", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_apply_relocks_and_refreshes() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(post_json("/api/admin/unlock", "{\"key\":\"nepal2081\"}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json("/api/admin/apply", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The session lock is back in place
        let response = app
            .oneshot(post_json("/api/sources/kantipur/toggle", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_login_interact_profile_flow() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/login",
                "{\"email\":\"sagar.sharma@gmail.com\"}",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_json("/api/interact", "{\"category\":\"Sports\"}"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        let response = app.clone().oneshot(get("/api/profile")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["favorite_category"], "Sports");
        assert_eq!(body["user"]["name"], "Sagar Sharma");

        let response = app
            .clone()
            .oneshot(post_json("/api/logout", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get("/api/profile")).await.unwrap();
        let body = json_body(response).await;
        assert!(body["user"].is_null());
        assert_eq!(body["favorite_category"], "none");
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let app = app().await;
        let response = app
            .oneshot(post_json("/api/login", "{\"email\":\"nobody@nowhere.com\"}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_challenge_reports_locked_state() {
        let app = app().await;
        let response = app.oneshot(get("/admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["locked"], true);
    }
}
