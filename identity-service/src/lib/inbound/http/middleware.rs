use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use crate::domain::user::models::CredentialArtifact;
use crate::domain::user::models::Identity;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Middleware that resolves the caller from a bearer token or session cookie,
/// requires an active account, and adds the identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let artifact = extract_artifact(req.headers(), &state.session_cookie.name);

    let identity = state.auth_service.authorize(artifact.as_ref()).await?;

    req.extensions_mut().insert(AuthenticatedUser(identity));

    Ok(next.run(req).await)
}

/// Pick the credential artifact a request carries.
///
/// An `Authorization` header wins over the cookie; a header that is not a
/// well-formed bearer credential yields no artifact at all.
fn extract_artifact(headers: &HeaderMap, cookie_name: &str) -> Option<CredentialArtifact> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let (scheme, token) = value.to_str().ok()?.split_once(' ')?;
        let token = token.trim();

        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            tracing::debug!("Malformed Authorization header");
            return None;
        }

        return Some(CredentialArtifact::BearerToken(token.to_string()));
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| CredentialArtifact::SessionId(cookie.value().to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(entries: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in entries {
            headers.append(name.clone(), HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers(&[(header::AUTHORIZATION, "Bearer abc.def.ghi")]);

        assert_eq!(
            extract_artifact(&headers, "session_id"),
            Some(CredentialArtifact::BearerToken("abc.def.ghi".to_string()))
        );
    }

    #[test]
    fn test_extract_session_cookie() {
        let headers = headers(&[(header::COOKIE, "theme=dark; session_id=cafe01")]);

        assert_eq!(
            extract_artifact(&headers, "session_id"),
            Some(CredentialArtifact::SessionId("cafe01".to_string()))
        );
    }

    #[test]
    fn test_authorization_header_takes_precedence() {
        let headers = headers(&[
            (header::AUTHORIZATION, "bearer abc.def.ghi"),
            (header::COOKIE, "session_id=cafe01"),
        ]);

        assert_eq!(
            extract_artifact(&headers, "session_id"),
            Some(CredentialArtifact::BearerToken("abc.def.ghi".to_string()))
        );
    }

    #[test]
    fn test_malformed_authorization_header() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "abc.def.ghi"] {
            let headers = headers(&[
                (header::AUTHORIZATION, value),
                (header::COOKIE, "session_id=cafe01"),
            ]);

            assert_eq!(extract_artifact(&headers, "session_id"), None, "{}", value);
        }
    }

    #[test]
    fn test_no_artifact() {
        let headers = headers(&[(header::COOKIE, "theme=dark")]);

        assert_eq!(extract_artifact(&headers, "session_id"), None);
    }
}
