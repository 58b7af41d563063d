//! Post endpoints

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireCaller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListQuery, Path, Query, ValidatedJson};
use crate::domain::{Author, Post, PostId};
use crate::infrastructure::post::PostContentRequest;

/// Body for both create and update. There is no author field; the author is the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct PostApiRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
}

impl From<PostApiRequest> for PostContentRequest {
    fn from(request: PostApiRequest) -> Self {
        Self {
            title: request.title,
            body: request.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.value(),
            name: author.name.clone(),
            email: author.email.clone(),
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub account_id: i64,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().value(),
            title: post.title().to_string(),
            body: post.body().to_string(),
            account_id: post.account_id().value(),
            author: AuthorResponse::from(post.author()),
            created_at: post.created_at(),
            updated_at: post.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostResponse>,
    pub total: usize,
}

/// POST /v1/posts
pub async fn create_post(
    State(state): State<AppState>,
    caller: RequireCaller,
    ValidatedJson(request): ValidatedJson<PostApiRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    debug!(account_id = %caller.0.account_id(), "Creating post");

    let post = state
        .post_service
        .create(&caller.context(), request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// GET /v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPostsResponse>, ApiError> {
    let page = query.page(&state.pagination)?;

    let posts = state.post_service.list(page, query.title_filter()).await?;

    let posts: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
    let total = posts.len();

    Ok(Json(ListPostsResponse { posts, total }))
}

/// GET /v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.post_service.get(PostId::new(id)).await?;

    Ok(Json(PostResponse::from(&post)))
}

/// PUT /v1/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    caller: RequireCaller,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<PostApiRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    debug!(post_id = id, "Updating post");

    let post = state
        .post_service
        .update(&caller.context(), PostId::new(id), request.into())
        .await?;

    Ok(Json(PostResponse::from(&post)))
}

/// DELETE /v1/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    caller: RequireCaller,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .post_service
        .delete(&caller.context(), PostId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
