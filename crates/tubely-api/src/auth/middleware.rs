use crate::auth::jwt::{get_bearer_token, validate_jwt};
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Authenticate the bearer token and attach the requestor to the request.
///
/// Requests without a valid token are answered with 401 before any handler runs.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match get_bearer_token(request.headers())
        .and_then(|token| validate_jwt(token, &auth_state.jwt_secret))
    {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %e,
                "Authentication failed"
            );
            return HttpAppError(e).into_response();
        }
    };

    request.extensions_mut().insert(AuthUser { user_id });

    next.run(request).await
}
