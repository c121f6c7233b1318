use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::{invite, project_member, ProjectRole};

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ChangeRoleRequest {
    pub project_id: Uuid,
    pub user_id: Uuid,
    /// `OWNER`, `ADMIN` or `USER`, case-insensitive.
    pub role: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct KickRequest {
    pub project_member_id: Uuid,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendInviteRequest {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct InviteActionRequest {
    pub invite_id: Uuid,
}

#[utoipa::path(
    post, path = "/admin/permissions", tag = "admin",
    request_body = ChangeRoleRequest,
    responses(
        (status = 204, description = "Role changed"),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn change_permission(State(state): State<ServerState>, Json(input): Json<ChangeRoleRequest>) -> Result<StatusCode, ApiError> {
    let role = ProjectRole::parse(&input.role).ok_or_else(|| ApiError::validation(format!("unknown role: {}", input.role)))?;
    state.svc.memberships.change_role(input.project_id, input.user_id, role).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/admin/kick", tag = "admin",
    request_body = KickRequest,
    responses((status = 204, description = "Member removed"), (status = 404, description = "Membership not found"))
)]
pub async fn kick(State(state): State<ServerState>, Json(input): Json<KickRequest>) -> Result<StatusCode, ApiError> {
    state.svc.memberships.kick_user(input.project_member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/admin/invite/send", tag = "admin",
    request_body = SendInviteRequest,
    responses(
        (status = 201, description = "Invite created"),
        (status = 400, description = "Self-invite"),
        (status = 404, description = "Unknown user or project")
    )
)]
pub async fn send_invite(State(state): State<ServerState>, Json(input): Json<SendInviteRequest>) -> Result<(StatusCode, Json<invite::Model>), ApiError> {
    let created = state.svc.invites.send_invite(input.sender_id, input.receiver_id, input.project_id).await?;
    info!(invite_id = %created.id, "invite send served");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post, path = "/admin/invite/accept", tag = "admin",
    request_body = InviteActionRequest,
    responses(
        (status = 200, description = "Accepted, membership created"),
        (status = 400, description = "Invite not pending"),
        (status = 404, description = "Invite not found"),
        (status = 409, description = "Already a member")
    )
)]
pub async fn accept_invite(State(state): State<ServerState>, Json(input): Json<InviteActionRequest>) -> Result<Json<project_member::Model>, ApiError> {
    Ok(Json(state.svc.invites.accept_invite(input.invite_id).await?))
}

#[utoipa::path(
    post, path = "/admin/invite/decline", tag = "admin",
    request_body = InviteActionRequest,
    responses(
        (status = 204, description = "Declined"),
        (status = 400, description = "Invite not pending"),
        (status = 404, description = "Invite not found")
    )
)]
pub async fn decline_invite(State(state): State<ServerState>, Json(input): Json<InviteActionRequest>) -> Result<StatusCode, ApiError> {
    state.svc.invites.decline_invite(input.invite_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
