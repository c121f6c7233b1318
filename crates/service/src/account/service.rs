use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::user;

use super::domain::{ProfileUpdateInput, SignupInput, UserView, MAX_PROFILE_IMAGE_BYTES};
use super::password::CredentialHasher;
use crate::errors::ServiceError;

/// Account business service independent of web framework
pub struct AccountService {
    db: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    pub fn new(db: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self { Self { db, hasher } }

    /// Register a new user with a hashed password.
    ///
    /// The lookups below only make the error message specific; the unique
    /// constraints on `user` decide the race between two concurrent signups,
    /// and the losing insert also surfaces as `Conflict`.
    #[instrument(skip(self, input), fields(username = %input.username, email = %input.email))]
    pub async fn register(&self, input: SignupInput) -> Result<UserView, ServiceError> {
        if input.password != input.password_confirm {
            return Err(ServiceError::Validation("password confirmation does not match".into()));
        }
        if input.password.is_empty() {
            return Err(ServiceError::Validation("password required".into()));
        }
        // surrounding whitespace is not part of an identity
        let username = input.username.trim();
        let email = input.email.trim();
        let nickname = input.nickname.trim();
        user::validate_username(username)?;
        user::validate_email(email)?;
        user::validate_nickname(nickname)?;

        if user::find_by_username(&self.db, username).await?.is_some() {
            debug!("username taken");
            return Err(ServiceError::conflict("username"));
        }
        if user::find_by_email(&self.db, email).await?.is_some() {
            debug!("email taken");
            return Err(ServiceError::conflict("email"));
        }
        if user::find_by_nickname(&self.db, nickname).await?.is_some() {
            debug!("nickname taken");
            return Err(ServiceError::conflict("nickname"));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let created = user::create(&self.db, user::NewUser { username, email, nickname, password_hash }).await?;
        info!(user_id = %created.id, algorithm = self.hasher.algorithm(), "user_registered");
        Ok(created.into())
    }

    /// Apply the non-empty fields of `input` to the account in one transaction.
    ///
    /// The transaction rolls back when dropped, so every early `?` return
    /// leaves the row untouched.
    #[instrument(skip(self, input))]
    pub async fn update_profile(&self, username: &str, input: ProfileUpdateInput) -> Result<UserView, ServiceError> {
        let txn = self.db.begin().await?;

        let current = user::find_by_username(&txn, username)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        let user_id = current.id;
        let current_nickname = current.nickname.clone();
        let mut am: user::ActiveModel = current.into();

        if let Some(nickname) = input.nickname.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            if nickname != current_nickname {
                user::validate_nickname(nickname)?;
                if let Some(other) = user::find_by_nickname(&txn, nickname).await? {
                    if other.id != user_id {
                        return Err(ServiceError::conflict("nickname"));
                    }
                }
                am.nickname = Set(nickname.to_string());
            }
        }

        if let Some(password) = input.password.as_deref().filter(|p| !p.is_empty()) {
            if input.password_confirm.as_deref() != Some(password) {
                return Err(ServiceError::Validation("password confirmation does not match".into()));
            }
            am.password_hash = Set(self.hasher.hash(password)?);
        }

        if let Some(image) = input.profile_image.as_deref().filter(|b| !b.is_empty()) {
            if image.len() > MAX_PROFILE_IMAGE_BYTES {
                return Err(ServiceError::Validation(format!(
                    "profile image exceeds {} bytes ({} given)",
                    MAX_PROFILE_IMAGE_BYTES,
                    image.len()
                )));
            }
            am.profile_image = Set(Some(STANDARD.encode(image)));
        }

        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        info!(user_id = %updated.id, "profile_updated");
        Ok(updated.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserView>, ServiceError> {
        Ok(user::find_by_username(&self.db, username).await?.map(UserView::from))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserView>, ServiceError> {
        Ok(user::find_by_id(&self.db, id).await?.map(UserView::from))
    }

    /// Check a plaintext password against the stored hash; unknown users never match.
    #[instrument(skip(self, password))]
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        match user::find_by_username(&self.db, username).await? {
            Some(u) => self.hasher.verify(password, &u.password_hash),
            None => Ok(false),
        }
    }
}
