use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::LoginRequestBody;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a username/password form for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(body): Form<LoginRequestBody>,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    let issued = state
        .auth_service
        .login_with_token(&body.username, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IssueTokenResponseData {
            access_token: issued.access_token,
            token_type: "bearer".to_string(),
            expires_at: issued.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTokenResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}
