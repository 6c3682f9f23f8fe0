//! Tenant context extraction from the auth session cookie.
//!
//! The session is a JSON document set by the authentication frontend in
//! the `auth_session` cookie. Handlers take the resolved [`TenantContext`]
//! as an extractor argument; nothing below the HTTP boundary reads the
//! cookie again.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use service_core::error::AppError;

pub const SESSION_COOKIE: &str = "auth_session";

/// Resolved tenant identity for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    /// Company the session is scoped to; every query is filtered by it.
    pub company_id: i64,
}

#[derive(Debug, Deserialize)]
struct AuthSession {
    company_id: Option<i64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar.get(SESSION_COOKIE).ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Missing auth session cookie"))
        })?;

        let session: AuthSession = serde_json::from_str(cookie.value()).map_err(|e| {
            tracing::error!(error = %e, "Malformed auth session cookie");
            AppError::InternalError(anyhow::anyhow!("Malformed auth session cookie: {}", e))
        })?;

        let company_id = session.company_id.ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("Company ID not found in session"))
        })?;

        let span = tracing::Span::current();
        span.record("company_id", company_id);

        Ok(TenantContext { company_id })
    }
}
