use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Items owned by the caller.
pub async fn get_current_user_items(
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
) -> ApiSuccess<Vec<ItemData>> {
    ApiSuccess::new(
        StatusCode::OK,
        vec![ItemData {
            item_id: "Foo".to_string(),
            owner: identity.username,
        }],
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub item_id: String,
    pub owner: String,
}
