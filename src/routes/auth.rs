// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: signup, login, logout.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, verify_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::time_utils::today_utc;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Returned on signup and login.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: User,
    /// Bearer token; also set as an HttpOnly cookie
    pub token: String,
    /// Login streak after today's transition (0 without a profile)
    pub streak: u32,
}

/// Cookies are `Secure` when the frontend is served over HTTPS.
fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .build()
}

/// Issue a session for `user`, applying the daily streak transition.
async fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let profile = state.tracker.record_login(user.id, today_utc()).await?;
    let token = create_jwt(user.id, &state.config.jwt_signing_key)?;

    let jar = jar.add(session_cookie(state, token.clone()));
    Ok((
        jar,
        Json(SessionResponse {
            user,
            token,
            streak: profile.map_or(0, |p| p.streak),
        }),
    ))
}

async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state
        .accounts
        .signup(&body.email, &body.password, &body.full_name)
        .await?;

    let (jar, response) = start_session(&state, jar, user).await?;
    Ok((StatusCode::CREATED, jar, response))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    body.validate().map_err(|_| AppError::InvalidCredentials)?;

    let user = state.accounts.login(&body.email, &body.password).await?;
    start_session(&state, jar, user).await
}

/// Clear the session cookie. A valid token also clears the stored current
/// user; an invalid or missing one is not an error.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(user_id) = verify_jwt(cookie.value(), &state.config.jwt_signing_key) {
            state.accounts.logout(user_id)?;
        }
    }

    let removal = Cookie::build(SESSION_COOKIE)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .build();

    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}
