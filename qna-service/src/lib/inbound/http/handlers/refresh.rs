use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use super::sign_in::session_response;
use super::sign_in::AccessTokenData;
use super::sign_in::REFRESH_TOKEN_COOKIE;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Rotate the session using the refresh token cookie.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<AccessTokenData>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let tokens = state.auth_service.refresh(&refresh_token).await?;

    Ok(session_response(jar, tokens, &state.settings))
}
