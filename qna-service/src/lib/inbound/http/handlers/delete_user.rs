use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete an account; users may only delete themselves.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = id.parse::<UserId>().map_err(AuthError::from)?;

    if user_id != current.user_id {
        return Err(ApiError::Forbidden(
            "Cannot delete another user's account".to_string(),
        ));
    }

    state.auth_service.delete_user(user_id).await?;

    // The account's tests are gone from storage through the author foreign key.
    state.test_service.evict_author(user_id);

    Ok(ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
