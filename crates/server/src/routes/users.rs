use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use service::account::domain::{ProfileUpdateInput, SignupInput, UserView};
use service::invite::domain::InviteView;
use service::ServiceError;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub password_confirm: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(r: SignupRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            nickname: r.nickname,
            password: r.password,
            password_confirm: r.password_confirm,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingInvitesResponse {
    pub has_pending: bool,
    pub invites: Vec<InviteView>,
}

#[utoipa::path(
    post, path = "/users/signup", tag = "users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username, email or nickname taken")
    )
)]
pub async fn signup(State(state): State<ServerState>, Json(input): Json<SignupRequest>) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let created = state.svc.accounts.register(input.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/users/{username}", tag = "users",
    params(("username" = String, Path, description = "Login name")),
    responses((status = 200, description = "User"), (status = 404, description = "Not Found"))
)]
pub async fn get_user(State(state): State<ServerState>, Path(username): Path<String>) -> Result<Json<UserView>, ApiError> {
    let found = state
        .svc
        .accounts
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(Json(found))
}

/// Multipart form with optional `nickname`, `password`, `password_confirm`
/// text fields and an optional `profile_image` file field.
#[utoipa::path(
    put, path = "/users/{username}/profile", tag = "users",
    params(("username" = String, Path, description = "Login name")),
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Nickname taken")
    )
)]
pub async fn update_profile(
    State(state): State<ServerState>,
    Path(username): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UserView>, ApiError> {
    let mut input = ProfileUpdateInput::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "nickname" => input.nickname = Some(utf8_text(field).await?),
            "password" => input.password = Some(utf8_text(field).await?),
            "password_confirm" => input.password_confirm = Some(utf8_text(field).await?),
            "profile_image" => input.profile_image = Some(field.bytes().await?.to_vec()),
            other => debug!(field = other, "ignoring unknown multipart field"),
        }
    }
    let updated = state.svc.accounts.update_profile(&username, input).await?;
    info!(user_id = %updated.id, "profile update served");
    Ok(Json(updated))
}

/// Read a text field, rejecting bytes that are not valid UTF-8 instead of
/// replacing them.
async fn utf8_text(field: Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or_default().to_string();
    let bytes = field.bytes().await?;
    String::from_utf8(bytes.to_vec()).map_err(|_| ApiError::validation(format!("field `{name}` is not valid UTF-8")))
}

#[utoipa::path(
    get, path = "/users/{user_id}/invites/pending", tag = "invites",
    params(("user_id" = Uuid, Path, description = "Receiver id")),
    responses((status = 200, description = "Pending invites of the user"))
)]
pub async fn pending_invites(State(state): State<ServerState>, Path(user_id): Path<Uuid>) -> Result<Json<PendingInvitesResponse>, ApiError> {
    let invites = state.svc.invites.list_pending_invites(user_id).await?;
    let has_pending = state.svc.invites.has_pending_invite(user_id).await?;
    Ok(Json(PendingInvitesResponse { has_pending, invites }))
}
