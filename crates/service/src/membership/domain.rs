use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::domain::UserView;

/// One member of a project joined with its account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberView {
    pub user_id: Uuid,
    pub nickname: String,
    pub email: String,
    /// Role name, e.g. `"ADMIN"`.
    pub role: String,
    pub project_member_id: Uuid,
    /// Account creation time of the user, not the membership.
    pub created_at: DateTime<FixedOffset>,
}

/// A user outside the project, flagged when an invite to it is still pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitableUserView {
    #[serde(flatten)]
    pub user: UserView,
    pub pending_invite: bool,
}
