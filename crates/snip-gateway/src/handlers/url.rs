use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use snip_core::ShortenerError;
use tracing::debug;

/// `POST /` with the URL as a plain-text body.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse> {
    let short_url = shorten(&state, body).await?;
    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "text/plain")],
        short_url,
    ))
}

/// `POST /api/shorten` with a `{"url": "..."}` body.
pub async fn shorten_json_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    if body.is_empty() {
        return Err(ShortenerError::EmptyInput("url").into());
    }

    let request: ShortenRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {e}")))?;

    let result = shorten(&state, request.url).await?;
    Ok((StatusCode::CREATED, Json(ShortenResponse { result })))
}

/// `GET /{code}` redirects to the original URL.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    match state.shortener().resolve(&code)? {
        Some(original_url) => Ok((
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, original_url)],
        )),
        None => Err(AppError::NotFound("URL not found".into())),
    }
}

/// `GET /` carries no code to resolve.
pub async fn missing_code_handler() -> AppError {
    ShortenerError::EmptyInput("short code").into()
}

async fn shorten(state: &AppState, original_url: String) -> Result<String> {
    if original_url.is_empty() {
        return Err(ShortenerError::EmptyInput("url").into());
    }

    // appends may fsync, keep them off the async workers
    let shortener = state.shortener();
    let shortened = tokio::task::spawn_blocking(move || shortener.shorten(&original_url))
        .await
        .map_err(|e| AppError::Internal(format!("shorten task failed: {e}")))??;

    debug!(
        code = %shortened.code,
        created = shortened.created,
        durability = ?shortened.durability,
        "shortened url"
    );

    Ok(shortened.code.to_url(state.base_url()))
}
