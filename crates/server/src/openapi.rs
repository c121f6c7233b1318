use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::signup,
        crate::routes::users::get_user,
        crate::routes::users::update_profile,
        crate::routes::users::pending_invites,
        crate::routes::projects::create,
        crate::routes::projects::get,
        crate::routes::projects::rename,
        crate::routes::projects::delete,
        crate::routes::projects::members,
        crate::routes::projects::member_role,
        crate::routes::projects::invitable_users,
        crate::routes::admin::change_permission,
        crate::routes::admin::kick,
        crate::routes::admin::send_invite,
        crate::routes::admin::accept_invite,
        crate::routes::admin::decline_invite,
    ),
    components(
        schemas(
            HealthResponse,
            crate::routes::users::SignupRequest,
            crate::routes::projects::CreateProjectRequest,
            crate::routes::projects::RenameProjectRequest,
            crate::routes::admin::ChangeRoleRequest,
            crate::routes::admin::KickRequest,
            crate::routes::admin::SendInviteRequest,
            crate::routes::admin::InviteActionRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "invites"),
        (name = "projects"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
