use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use time::OffsetDateTime;

use super::ApiError;
use super::ApiSuccess;
use super::LoginRequestBody;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a username/password form for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let session = state
        .auth_service
        .login_with_session(&body.username, &body.password)
        .await?;

    let expires = OffsetDateTime::from_unix_timestamp(session.expires_at.timestamp())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let cookie = Cookie::build((state.session_cookie.name.clone(), session.session_id))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.session_cookie.secure)
        .path("/")
        .expires(expires);

    Ok((
        jar.add(cookie),
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                username: session.username,
                expires_at: session.expires_at,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
