use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::error::LedgerError;

/// Rejects any request whose `Authorization: Bearer <token>` does not match
/// the configured access token exactly.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, LedgerError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == state.config.access_token);

    if !authorized {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "Rejected request with invalid or missing token"
        );
        return Err(LedgerError::Auth);
    }

    Ok(next.run(request).await)
}
