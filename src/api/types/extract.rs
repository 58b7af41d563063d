//! Path and query extractors with stable rejection messages

use axum::{
    extract::{FromRequestParts, Path as AxumPath, Query as AxumQuery},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::error::ApiError;
use crate::config::PaginationConfig;
use crate::domain::PageRequest;

/// Typed path parameters. Any parse failure is `invalid_path_parameter`.
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumPath(value)| Path(value))
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected path parameter");
                ApiError::invalid_path_parameter()
            })
    }
}

/// Typed query string. Any parse failure is `invalid_query_parameter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumQuery::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumQuery(value)| Query(value))
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected query string");
                ApiError::invalid_query_parameter()
            })
    }
}

/// `?limit=&offset=` plus the optional substring filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub name: Option<String>,
    pub title: Option<String>,
}

impl ListQuery {
    /// Negative values are rejected here, before any service call
    pub fn page(&self, config: &PaginationConfig) -> Result<PageRequest, ApiError> {
        PageRequest::new(
            self.limit,
            self.offset,
            config.default_limit,
            config.max_limit,
        )
        .map_err(|e| {
            debug!(error = %e, "Rejected pagination parameters");
            ApiError::invalid_query_parameter()
        })
    }

    pub fn name_filter(&self) -> Option<String> {
        non_blank(self.name.as_deref())
    }

    pub fn title_filter(&self) -> Option<String> {
        non_blank(self.title.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
