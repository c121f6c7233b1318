use crate::db::{connect_in_memory, migrate};
use crate::errors::ModelError;
use crate::{invite, project, project_member, user, InviteStatus, ProjectRole};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migrate(&db).await?;
    Ok(db)
}

fn new_user<'a>(username: &'a str, email: &'a str, nickname: &'a str) -> user::NewUser<'a> {
    user::NewUser { username, email, nickname, password_hash: "$argon2id$placeholder".into() }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, new_user("alice", "alice@example.com", "Alice")).await?;
    assert_eq!(created.username, "alice");
    assert!(created.profile_image.is_none());

    let by_name = user::find_by_username(&db, "alice").await?.unwrap();
    assert_eq!(by_name.id, created.id);
    let by_email = user::find_by_email(&db, "alice@example.com").await?.unwrap();
    assert_eq!(by_email.id, created.id);
    let by_nick = user::find_by_nickname(&db, "Alice").await?.unwrap();
    assert_eq!(by_nick.id, created.id);
    assert!(user::find_by_id(&db, Uuid::new_v4()).await?.is_none());
    assert!(user::find_by_username(&db, "bob").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let db = setup_test_db().await?;
    let err = user::create(&db, new_user("", "x@example.com", "X")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    let err = user::create(&db, new_user("x", "not-an-email", "X")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    let err = user::create(&db, new_user("x", "x@example.com", "  ")).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(user::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unique_columns_are_enforced_by_schema() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, new_user("alice", "alice@example.com", "Alice")).await?;

    let dup_username = user::create(&db, new_user("alice", "other@example.com", "Other")).await.unwrap_err();
    assert!(matches!(dup_username, ModelError::Conflict(_)), "got {dup_username:?}");
    let dup_email = user::create(&db, new_user("other", "alice@example.com", "Other")).await.unwrap_err();
    assert!(matches!(dup_email, ModelError::Conflict(_)), "got {dup_email:?}");
    let dup_nick = user::create(&db, new_user("other", "other@example.com", "Alice")).await.unwrap_err();
    assert!(matches!(dup_nick, ModelError::Conflict(_)), "got {dup_nick:?}");
    Ok(())
}

#[tokio::test]
async fn test_membership_pair_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, new_user("alice", "alice@example.com", "Alice")).await?;
    let p = project::create(&db, "coop").await?;

    let m = project_member::create(&db, p.id, u.id, ProjectRole::User).await?;
    assert_eq!(m.role, ProjectRole::User);
    let found = project_member::find_by_project_and_user(&db, p.id, u.id).await?.unwrap();
    assert_eq!(found.id, m.id);

    let err = project_member::create(&db, p.id, u.id, ProjectRole::Admin).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_invite_pending_count() -> Result<()> {
    let db = setup_test_db().await?;
    let a = user::create(&db, new_user("alice", "alice@example.com", "Alice")).await?;
    let b = user::create(&db, new_user("bob", "bob@example.com", "Bob")).await?;
    let p = project::create(&db, "coop").await?;

    assert_eq!(invite::count_pending_for_receiver(&db, b.id).await?, 0);
    let inv = invite::create(&db, a.id, b.id, p.id).await?;
    assert_eq!(inv.status, InviteStatus::Pending);
    assert_eq!(invite::count_pending_for_receiver(&db, b.id).await?, 1);
    assert_eq!(invite::count_pending_for_receiver(&db, a.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_project_name_required() -> Result<()> {
    let db = setup_test_db().await?;
    let err = project::create(&db, "   ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[test]
fn test_role_names_round_trip() {
    for role in [ProjectRole::Owner, ProjectRole::Admin, ProjectRole::User] {
        assert_eq!(ProjectRole::parse(role.name()), Some(role));
    }
    assert_eq!(ProjectRole::parse("admin"), Some(ProjectRole::Admin));
    assert_eq!(ProjectRole::parse("guest"), None);
}
