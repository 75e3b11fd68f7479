use crate::error::RenderedError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Strip `details` and `error_type` from error bodies when `hide` is set.
///
/// `hide` comes from `Config::is_production` at router setup.
pub async fn hide_error_details(
    State(hide): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    if !hide {
        return response;
    }

    match response.extensions_mut().remove::<RenderedError>() {
        Some(RenderedError(mut body)) => {
            body.details = None;
            body.error_type = None;
            let status = response.status();
            (status, Json(body)).into_response()
        }
        None => response,
    }
}
