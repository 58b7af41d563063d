//! Account endpoints

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireCaller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListQuery, Path, Query, ValidatedJson};
use crate::domain::{Account, AccountId};
use crate::infrastructure::account::{
    RegisterAccountRequest, UpdatePasswordRequest, UpdateProfileRequest,
};

/// Request to register an account
#[derive(Deserialize, Validate)]
pub struct CreateAccountApiRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Request to change name and email
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountApiRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdatePasswordApiRequest {
    #[validate(length(min = 1, message = "old_password must not be empty"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "new_password must be at least 8 characters"))]
    pub new_password: String,
}

/// Public view of an account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().value(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            created_at: account.created_at(),
            updated_at: account.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountResponse>,
    pub total: usize,
}

/// POST /v1/accounts
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAccountApiRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    debug!(email = %request.email, "Registering account");

    let account = state
        .account_service
        .register(RegisterAccountRequest {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// GET /v1/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let page = query.page(&state.pagination)?;

    let accounts = state
        .account_service
        .list(page, query.name_filter())
        .await?;

    let accounts: Vec<AccountResponse> = accounts.iter().map(AccountResponse::from).collect();
    let total = accounts.len();

    Ok(Json(ListAccountsResponse { accounts, total }))
}

/// GET /v1/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.account_service.get(AccountId::new(id)).await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /v1/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    caller: RequireCaller,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateAccountApiRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    debug!(account_id = id, "Updating account profile");

    let account = state
        .account_service
        .update_profile(
            &caller.context(),
            AccountId::new(id),
            UpdateProfileRequest {
                name: request.name,
                email: request.email,
            },
        )
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /v1/accounts/{id}/password
pub async fn update_password(
    State(state): State<AppState>,
    caller: RequireCaller,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdatePasswordApiRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .account_service
        .update_password(
            &caller.context(),
            AccountId::new(id),
            UpdatePasswordRequest {
                old_password: request.old_password,
                new_password: request.new_password,
            },
        )
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// DELETE /v1/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    caller: RequireCaller,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .account_service
        .delete(&caller.context(), AccountId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
