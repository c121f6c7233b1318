use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod admin;
pub mod projects;
pub mod users;

/// Room for a maximal profile image plus the other form fields; the image
/// size itself is checked by the account service.
pub const PROFILE_BODY_LIMIT: usize = 4 * 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: accounts, projects and the admin actions.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // one parameter name per segment: `:user` is a username or an id depending on the route
    let user_routes = Router::new()
        .route("/users/signup", post(users::signup))
        .route("/users/:user", get(users::get_user))
        .route(
            "/users/:user/profile",
            put(users::update_profile).layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT)),
        )
        .route("/users/:user/invites/pending", get(users::pending_invites));

    let project_routes = Router::new()
        .route("/projects", post(projects::create))
        .route(
            "/projects/:project_id",
            get(projects::get).put(projects::rename).delete(projects::delete),
        )
        .route("/projects/:project_id/members", get(projects::members))
        .route("/projects/:project_id/members/:user_id/role", get(projects::member_role))
        .route("/projects/:project_id/invitable-users", get(projects::invitable_users));

    let admin_routes = Router::new()
        .route("/admin/permissions", post(admin::change_permission))
        .route("/admin/kick", post(admin::kick))
        .route("/admin/invite/send", post(admin::send_invite))
        .route("/admin/invite/accept", post(admin::accept_invite))
        .route("/admin/invite/decline", post(admin::decline_invite));

    public
        .merge(user_routes)
        .merge(project_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
