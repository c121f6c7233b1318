use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::project_member;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ProjectMember,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::ProjectMember => Entity::has_many(project_member::Entity).into() }
    }
}

impl Related<project_member::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProjectMember.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row values for a new account; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub nickname: &'a str,
    pub password_hash: String,
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() { return Err(ModelError::Validation("username required".into())); }
    if trimmed.len() > 64 { return Err(ModelError::Validation("username too long (<=64)".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.trim().is_empty() { return Err(ModelError::Validation("email required".into())); }
    if !email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
    if email.len() > 255 { return Err(ModelError::Validation("email too long (<=255)".into())); }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> Result<(), ModelError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() { return Err(ModelError::Validation("nickname required".into())); }
    if trimmed.len() > 64 { return Err(ModelError::Validation("nickname too long (<=64)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser<'_>) -> Result<Model, errors::ModelError> {
    validate_username(new.username)?;
    validate_email(new.email)?;
    validate_nickname(new.nickname)?;
    if new.password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(new.username.trim().to_string()),
        email: Set(new.email.trim().to_string()),
        nickname: Set(new.nickname.trim().to_string()),
        password_hash: Set(new.password_hash),
        profile_image: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn find_by_nickname<C: ConnectionTrait>(db: &C, nickname: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Nickname.eq(nickname)).one(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}
