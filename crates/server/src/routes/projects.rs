use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{project, ProjectRole};
use service::membership::domain::{InvitableUserView, MemberView};
use service::ServiceError;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RenameProjectRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleResponse {
    /// `null` when the user is not a member.
    pub role: Option<ProjectRole>,
}

#[utoipa::path(
    post, path = "/projects", tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Created, owner added as OWNER"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CreateProjectRequest>) -> Result<(StatusCode, Json<project::Model>), ApiError> {
    let created = service::project::create_project(&state.svc.db, &input.name, input.owner_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/projects/{project_id}", tag = "projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Project"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(project_id): Path<Uuid>) -> Result<Json<project::Model>, ApiError> {
    let found = service::project::get_project(&state.svc.db, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("project"))?;
    Ok(Json(found))
}

#[utoipa::path(
    put, path = "/projects/{project_id}", tag = "projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    request_body = RenameProjectRequest,
    responses(
        (status = 200, description = "Renamed"),
        (status = 400, description = "Blank name"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn rename(
    State(state): State<ServerState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<RenameProjectRequest>,
) -> Result<Json<project::Model>, ApiError> {
    Ok(Json(service::project::rename_project(&state.svc.db, project_id, &input.name).await?))
}

#[utoipa::path(
    delete, path = "/projects/{project_id}", tag = "projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses((status = 204, description = "Deleted with its members and invites"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(project_id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    service::project::delete_project(&state.svc.db, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/projects/{project_id}/members", tag = "projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Members in unspecified order"))
)]
pub async fn members(State(state): State<ServerState>, Path(project_id): Path<Uuid>) -> Result<Json<Vec<MemberView>>, ApiError> {
    Ok(Json(state.svc.memberships.find_all_members(project_id).await?))
}

#[utoipa::path(
    get, path = "/projects/{project_id}/members/{user_id}/role", tag = "projects",
    params(
        ("project_id" = Uuid, Path, description = "Project id"),
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses((status = 200, description = "Role, or null for non-members"))
)]
pub async fn member_role(State(state): State<ServerState>, Path((project_id, user_id)): Path<(Uuid, Uuid)>) -> Result<Json<RoleResponse>, ApiError> {
    let role = state.svc.memberships.get_project_role(user_id, project_id).await?;
    Ok(Json(RoleResponse { role }))
}

#[utoipa::path(
    get, path = "/projects/{project_id}/invitable-users", tag = "projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses((status = 200, description = "Users not yet in the project, with a pending_invite flag"), (status = 404, description = "Project not found"))
)]
pub async fn invitable_users(State(state): State<ServerState>, Path(project_id): Path<Uuid>) -> Result<Json<Vec<InvitableUserView>>, ApiError> {
    Ok(Json(state.svc.memberships.list_invitable_users(project_id).await?))
}
