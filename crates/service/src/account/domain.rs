use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::user;

/// Upper bound for a profile image before base64 encoding (2 MiB).
pub const MAX_PROFILE_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Signup input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub password_confirm: String,
}

/// Profile update input. Every field is optional; `None` and empty values
/// leave the stored value as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdateInput {
    pub nickname: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    /// Raw image bytes as uploaded.
    pub profile_image: Option<Vec<u8>>,
}

/// Account as exposed to callers; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub nickname: String,
    /// Base64 (standard alphabet) encoded image.
    pub profile_image: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            nickname: u.nickname,
            profile_image: u.profile_image,
            created_at: u.created_at,
        }
    }
}
