use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::TokenPair;
use crate::inbound::http::middleware::ACCESS_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::HttpSettings;

/// Cookie carrying the refresh token; only sent to the auth routes.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
const REFRESH_TOKEN_COOKIE_PATH: &str = "/api/v1/auth";

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<SignInRequest>,
) -> Result<(CookieJar, ApiSuccess<AccessTokenData>), ApiError> {
    let tokens = state
        .auth_service
        .sign_in(SignInCommand {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(session_response(jar, tokens, &state.settings))
}

/// Set both session cookies and return the access token in the body.
pub(super) fn session_response(
    jar: CookieJar,
    tokens: TokenPair,
    settings: &HttpSettings,
) -> (CookieJar, ApiSuccess<AccessTokenData>) {
    let access_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, tokens.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax);

    let refresh_cookie = Cookie::build((REFRESH_TOKEN_COOKIE, tokens.refresh_token))
        .path(REFRESH_TOKEN_COOKIE_PATH)
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Strict);

    (
        jar.add(access_cookie).add(refresh_cookie),
        ApiSuccess::new(
            StatusCode::OK,
            AccessTokenData {
                access_token: tokens.access_token,
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
