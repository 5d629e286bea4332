//! Framework-agnostic endpoint handlers
//!
//! Each handler takes an already-verified [`Session`] (if any) plus a typed
//! request body and returns either an [`ApiResponse`] or an [`ApiError`]. Wiring
//! them to an HTTP server is left to the embedding application.

use super::error::ApiError;
use crate::catalog::{AppInput, AppOrder, CatalogService};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

/// Signed-in user, as resolved from the session cookie by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub github_username: String,
}

/// Only the configured GitHub login may modify the catalog
pub fn is_admin(session: Option<&Session>, admin_username: Option<&str>) -> bool {
    match (session, admin_username) {
        (Some(session), Some(admin)) => !admin.is_empty() && session.github_username == admin,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub input: AppInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub orders: Vec<AppOrder>,
}

pub struct AppIndexApi {
    service: CatalogService,
    admin_username: Option<String>,
}

impl AppIndexApi {
    pub fn new(service: CatalogService, admin_username: Option<String>) -> Self {
        Self {
            service,
            admin_username,
        }
    }

    fn require_admin<'a>(&self, session: Option<&'a Session>) -> Result<&'a Session, ApiError> {
        match session {
            Some(s) if is_admin(Some(s), self.admin_username.as_deref()) => Ok(s),
            _ => {
                if let Some(s) = session {
                    warn!(user = %s.github_username, "Rejected non-admin catalog change");
                }
                Err(ApiError::Forbidden)
            }
        }
    }

    pub async fn list_apps(&self) -> Result<ApiResponse, ApiError> {
        let apps = self.service.list_apps().await?;
        Ok(ApiResponse::ok(to_json(&apps)?))
    }

    pub async fn list_tech(&self) -> Result<ApiResponse, ApiError> {
        let tech = self.service.list_tech().await?;
        Ok(ApiResponse::ok(to_json(&tech)?))
    }

    /// Detection preview for the add/edit dialog. Any signed-in user may call it.
    pub async fn detect_tech(
        &self,
        session: Option<&Session>,
        request: DetectRequest,
    ) -> Result<ApiResponse, ApiError> {
        if session.is_none() {
            return Err(ApiError::Unauthorized);
        }
        let github_url = request
            .github_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing github_url"))?;

        let detected = self.service.detect_catalog_tech(&github_url).await?;
        Ok(ApiResponse::ok(json!({ "detected": to_json(&detected)? })))
    }

    pub async fn create_app(
        &self,
        session: Option<&Session>,
        input: AppInput,
    ) -> Result<ApiResponse, ApiError> {
        let session = self.require_admin(session)?;
        let id = self.service.create_app(session.user_id, &input).await?;
        Ok(ApiResponse::created(json!({ "id": id })))
    }

    pub async fn update_app(
        &self,
        session: Option<&Session>,
        request: UpdateAppRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.require_admin(session)?;
        let id = request
            .id
            .filter(|id| *id != 0)
            .ok_or_else(|| ApiError::bad_request("Missing app id"))?;

        self.service.update_app(id, &request.input).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }

    pub async fn delete_app(
        &self,
        session: Option<&Session>,
        id: Option<i64>,
    ) -> Result<ApiResponse, ApiError> {
        self.require_admin(session)?;
        let id = id
            .filter(|id| *id != 0)
            .ok_or_else(|| ApiError::bad_request("Missing app id"))?;

        self.service.delete_app(id).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }

    pub async fn reorder_apps(
        &self,
        session: Option<&Session>,
        request: ReorderRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.require_admin(session)?;
        if request.orders.is_empty() {
            return Err(ApiError::bad_request("Invalid orders"));
        }

        self.service.reorder_apps(&request.orders).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}
