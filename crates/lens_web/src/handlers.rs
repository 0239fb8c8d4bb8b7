use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lens_core::{Article, Category, Source, UserProfile, ADMIN_ACCESS_KEY};
use lens_feed::FeedController;
use lens_storage::mock_accounts;
use serde::{Deserialize, Serialize};

use crate::AppState;

type ApiError = (StatusCode, String);

fn internal(e: lens_core::Error) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// What a page render needs: heading, optional hero, and the grid.
#[derive(Debug, Serialize)]
pub struct FeedView {
    pub heading: String,
    pub active_category: Category,
    pub is_searching: bool,
    pub hero: Option<Article>,
    pub articles: Vec<Article>,
}

fn feed_view(controller: &FeedController) -> FeedView {
    FeedView {
        heading: controller.section_heading(),
        active_category: controller.state().active_category,
        is_searching: controller.state().is_searching,
        hero: controller.hero().cloned(),
        articles: controller.grid().to_vec(),
    }
}

#[derive(Deserialize)]
pub struct FeedQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub filtered: bool,
}

pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedView>, ApiError> {
    let category = match query.category.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|e: lens_core::Error| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => Category::Latest,
    };

    let mut controller = state.controller.lock().await;
    if query.filtered {
        controller.select_category_filtered(category).await;
    } else {
        controller.select_category(category).await;
    }
    Ok(Json(feed_view(&controller)))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<FeedView> {
    let mut controller = state.controller.lock().await;
    controller.search(&query.q).await;
    Json(feed_view(&controller))
}

pub async fn list_sources(State(state): State<Arc<AppState>>) -> Json<Vec<Source>> {
    Json(state.registry.list().await)
}

#[derive(Serialize)]
pub struct ToggleView {
    pub id: String,
    pub enabled: bool,
}

pub async fn toggle_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ToggleView>, ApiError> {
    if !*state.admin_unlocked.read().await {
        return Err((StatusCode::FORBIDDEN, "Admin access required".to_string()));
    }

    match state.registry.toggle(&id).await.map_err(internal)? {
        Some(enabled) => Ok(Json(ToggleView { id, enabled })),
        None => Err((StatusCode::NOT_FOUND, format!("Unknown source: {}", id))),
    }
}

#[derive(Serialize)]
pub struct AdminChallenge {
    pub locked: bool,
    pub message: String,
}

/// The access-key challenge behind the `/admin` path.
pub async fn admin_challenge(State(state): State<Arc<AppState>>) -> Json<AdminChallenge> {
    let locked = !*state.admin_unlocked.read().await;
    Json(AdminChallenge {
        locked,
        message: if locked {
            "Enter the access key via POST /api/admin/unlock".to_string()
        } else {
            "Source management unlocked for this session".to_string()
        },
    })
}

#[derive(Deserialize)]
pub struct UnlockRequest {
    pub key: String,
}

/// Plaintext key comparison; a wrong key gets an alert-style message and
/// nothing else — no lockout, no rate limiting.
pub async fn admin_unlock(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<AdminChallenge>, ApiError> {
    if request.key != ADMIN_ACCESS_KEY {
        return Err((StatusCode::UNAUTHORIZED, "Invalid access key".to_string()));
    }

    *state.admin_unlocked.write().await = true;
    Ok(Json(AdminChallenge {
        locked: false,
        message: "Source management unlocked for this session".to_string(),
    }))
}

/// Save & apply: relock the panel and re-fetch the active category with
/// the updated enabled set.
pub async fn admin_apply(State(state): State<Arc<AppState>>) -> Json<FeedView> {
    *state.admin_unlocked.write().await = false;

    let mut controller = state.controller.lock().await;
    controller.refresh().await;
    Json(feed_view(&controller))
}

pub async fn list_accounts() -> Json<Vec<UserProfile>> {
    Json(mock_accounts())
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let account = mock_accounts()
        .into_iter()
        .find(|a| a.email == request.email)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown account: {}", request.email)))?;

    state.profiles.login(account.clone()).await.map_err(internal)?;
    Ok(Json(account))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.profiles.logout().await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct ProfileView {
    pub user: Option<UserProfile>,
    /// Feeds the recommendation banner; "none" until an interest exists.
    pub favorite_category: String,
}

pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<ProfileView> {
    Json(ProfileView {
        user: state.profiles.current().await,
        favorite_category: state
            .profiles
            .favorite_category()
            .await
            .unwrap_or_else(|| "none".to_string()),
    })
}

#[derive(Deserialize)]
pub struct InteractRequest {
    pub category: String,
}

pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InteractRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .profiles
        .record_interaction(&request.category)
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}
