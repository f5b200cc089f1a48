use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Close the caller's session, if any, and expire the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let session_id = jar
        .get(&state.session_cookie.name)
        .map(|cookie| cookie.value().to_string());

    if let Some(session_id) = session_id {
        state.auth_service.logout(&session_id).await;
    }

    let removal = Cookie::build((state.session_cookie.name.clone(), "")).path("/");

    (jar.remove(removal), StatusCode::NO_CONTENT)
}
