use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{project, project_member, user, ProjectRole};
use crate::errors::ServiceError;

/// Create a project owned by `owner_id`.
///
/// The project row and the owner's `OWNER` membership are written in one
/// transaction.
#[instrument(skip(db))]
pub async fn create_project(db: &DatabaseConnection, name: &str, owner_id: Uuid) -> Result<project::Model, ServiceError> {
    project::validate_name(name)?;
    let txn = db.begin().await?;
    if user::find_by_id(&txn, owner_id).await?.is_none() {
        return Err(ServiceError::not_found("owner"));
    }
    let created = project::create(&txn, name).await?;
    project_member::create(&txn, created.id, owner_id, ProjectRole::Owner).await?;
    txn.commit().await?;
    info!(project_id = %created.id, "project_created");
    Ok(created)
}

/// Get project by id.
pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<Option<project::Model>, ServiceError> {
    Ok(project::Entity::find_by_id(id).one(db).await?)
}

/// Rename a project; the new name must be non-blank and is stored trimmed.
#[instrument(skip(db))]
pub async fn rename_project(db: &DatabaseConnection, id: Uuid, name: &str) -> Result<project::Model, ServiceError> {
    project::validate_name(name)?;
    let mut am: project::ActiveModel = project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("project"))?
        .into();
    am.name = Set(name.trim().to_string());
    let updated = am.update(db).await?;
    info!("project_renamed");
    Ok(updated)
}

/// Hard delete a project. Its memberships and invites go with it through the
/// `ON DELETE CASCADE` foreign keys.
#[instrument(skip(db))]
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = project::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("project"));
    }
    info!("project_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::invite;
    use crate::test_support::{get_db, seed_user};

    #[tokio::test]
    async fn create_project_registers_owner() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = seed_user(&db, "alice").await?;

        let p = create_project(&db, "  coop  ", alice.id).await?;
        assert_eq!(p.name, "coop");
        let found = get_project(&db, p.id).await?.unwrap();
        assert_eq!(found.id, p.id);

        let m = project_member::find_by_project_and_user(&db, p.id, alice.id).await?.unwrap();
        assert_eq!(m.role, ProjectRole::Owner);
        Ok(())
    }

    #[tokio::test]
    async fn create_project_validates_input() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = seed_user(&db, "alice").await?;

        let err = create_project(&db, "   ", alice.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = create_project(&db, "coop", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        // the failed attempt left no project behind
        assert!(project::Entity::find().all(&db).await?.is_empty());
        assert!(get_project(&db, Uuid::new_v4()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn rename_project_updates_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = seed_user(&db, "alice").await?;
        let p = create_project(&db, "coop", alice.id).await?;

        let renamed = rename_project(&db, p.id, " co-op ").await?;
        assert_eq!(renamed.name, "co-op");
        assert_eq!(get_project(&db, p.id).await?.map(|p| p.name), Some("co-op".to_string()));

        let err = rename_project(&db, p.id, "  ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = rename_project(&db, Uuid::new_v4(), "x").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_project_cascades_to_members_and_invites() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let p = create_project(&db, "coop", alice.id).await?;
        invite::create(&db, alice.id, bob.id, p.id).await?;

        delete_project(&db, p.id).await?;
        assert!(get_project(&db, p.id).await?.is_none());
        assert!(project_member::find_by_project_and_user(&db, p.id, alice.id).await?.is_none());
        assert_eq!(invite::count_pending_for_receiver(&db, bob.id).await?, 0);
        // users themselves survive
        assert!(user::find_by_id(&db, alice.id).await?.is_some());

        let err = delete_project(&db, p.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
