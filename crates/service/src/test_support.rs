#![cfg(test)]
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::db::{connect_in_memory, migrate};
use models::{project, user};

use crate::account::{Argon2Hasher, CredentialHasher};

/// Fresh, migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migrate(&db).await?;
    Ok(db)
}

/// Minimum-cost argon2 so tests do not spend their time hashing.
pub fn cheap_hasher() -> Arc<dyn CredentialHasher> {
    Arc::new(Argon2Hasher::new(256, 1, 1).expect("valid argon2 params"))
}

pub async fn seed_user(db: &DatabaseConnection, name: &str) -> Result<user::Model, anyhow::Error> {
    let email = format!("{name}@example.com");
    let nickname = format!("{name}_{}", &Uuid::new_v4().simple().to_string()[..8]);
    Ok(user::create(
        db,
        user::NewUser { username: name, email: &email, nickname: &nickname, password_hash: "$argon2id$seed".into() },
    )
    .await?)
}

pub async fn seed_project(db: &DatabaseConnection, name: &str) -> Result<project::Model, anyhow::Error> {
    Ok(project::create(db, name).await?)
}
