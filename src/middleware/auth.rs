use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthState, TokenError};
use crate::error::ApiError;

/// Authentication middleware: validates the bearer credential against the
/// token store and rejects the request before it reaches the handler.
pub async fn require_bearer(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())
        .map_err(|err| ApiError::unauthorized(err.to_string()))?;

    let identity = match auth.tokens.validate(&token).await {
        Ok(identity) => identity,
        Err(TokenError::Store(err)) => {
            tracing::error!(error = %err, "token store lookup failed");
            return Err(ApiError::service_unavailable(
                "authorization temporarily unavailable",
            ));
        }
        Err(err) => return Err(ApiError::unauthorized(err.to_string())),
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer(headers: &HeaderMap) -> Result<String, TokenError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?;

    let value = header
        .to_str()
        .map_err(|_| TokenError::Malformed("invalid authorization header encoding".to_string()))?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        TokenError::Malformed("authorization header must use the Bearer scheme".to_string())
    })?;

    if token.trim().is_empty() {
        return Err(TokenError::Malformed("empty bearer token".to_string()));
    }

    Ok(token.to_string())
}
