use std::collections::HashSet;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{invite, project, project_member, user, InviteStatus, ProjectRole};

use super::domain::{InvitableUserView, MemberView};
use crate::account::domain::UserView;
use crate::errors::ServiceError;

/// Membership rules for a project; every mutation is a single statement.
pub struct MembershipService {
    db: DatabaseConnection,
}

impl MembershipService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// All members of `project_id` with their account details.
    ///
    /// The order of the returned members is unspecified.
    #[instrument(skip(self))]
    pub async fn find_all_members(&self, project_id: Uuid) -> Result<Vec<MemberView>, ServiceError> {
        let rows = project_member::Entity::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        let members = rows
            .into_iter()
            .filter_map(|(m, u)| {
                u.map(|u| MemberView {
                    user_id: u.id,
                    nickname: u.nickname,
                    email: u.email,
                    role: m.role.name().to_string(),
                    project_member_id: m.id,
                    created_at: u.created_at,
                })
            })
            .collect();
        Ok(members)
    }

    /// Role of `user_id` in `project_id`; `None` when the user is not a member.
    pub async fn get_project_role(&self, user_id: Uuid, project_id: Uuid) -> Result<Option<ProjectRole>, ServiceError> {
        let found = project_member::find_by_project_and_user(&self.db, project_id, user_id).await?;
        Ok(found.map(|m| m.role))
    }

    #[instrument(skip(self, role), fields(role = %role))]
    pub async fn change_role(&self, project_id: Uuid, user_id: Uuid, role: ProjectRole) -> Result<(), ServiceError> {
        let res = project_member::Entity::update_many()
            .set(project_member::ActiveModel { role: Set(role), ..Default::default() })
            .filter(project_member::Column::ProjectId.eq(project_id))
            .filter(project_member::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            warn!("change_role matched no membership");
            return Err(ServiceError::not_found("project member"));
        }
        info!("role_changed");
        Ok(())
    }

    /// Remove a membership row by its own id.
    #[instrument(skip(self))]
    pub async fn kick_user(&self, project_member_id: Uuid) -> Result<(), ServiceError> {
        let res = project_member::Entity::delete_by_id(project_member_id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            warn!("kick_user matched no membership");
            return Err(ServiceError::not_found("project member"));
        }
        info!("member_kicked");
        Ok(())
    }

    /// Add `user_id` to `project_id`. An existing membership is a `Conflict`.
    #[instrument(skip(self, role), fields(role = %role))]
    pub async fn add_member(&self, project_id: Uuid, user_id: Uuid, role: ProjectRole) -> Result<project_member::Model, ServiceError> {
        if project::Entity::find_by_id(project_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::not_found("project"));
        }
        if user::find_by_id(&self.db, user_id).await?.is_none() {
            return Err(ServiceError::not_found("user"));
        }
        let created = project_member::create(&self.db, project_id, user_id, role).await?;
        info!(project_member_id = %created.id, "member_added");
        Ok(created)
    }

    /// Users that are not members of `project_id` yet, ordered by nickname.
    /// `pending_invite` marks those already holding a `PENDING` invite to it.
    pub async fn list_invitable_users(&self, project_id: Uuid) -> Result<Vec<InvitableUserView>, ServiceError> {
        if project::Entity::find_by_id(project_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::not_found("project"));
        }
        let member_ids: Vec<Uuid> = project_member::Entity::find()
            .select_only()
            .column(project_member::Column::UserId)
            .filter(project_member::Column::ProjectId.eq(project_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        let users = user::Entity::find()
            .filter(user::Column::Id.is_not_in(member_ids))
            .order_by_asc(user::Column::Nickname)
            .all(&self.db)
            .await?;
        let pending: HashSet<Uuid> = invite::Entity::find()
            .select_only()
            .column(invite::Column::ReceiverId)
            .filter(invite::Column::ProjectId.eq(project_id))
            .filter(invite::Column::Status.eq(InviteStatus::Pending))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();
        Ok(users
            .into_iter()
            .map(|u| InvitableUserView { pending_invite: pending.contains(&u.id), user: UserView::from(u) })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_project, seed_user};

    #[tokio::test]
    async fn find_all_members_joins_user_details() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let outsider = seed_user(&db, "carol").await?;
        let p = seed_project(&db, "coop").await?;
        let other = seed_project(&db, "elsewhere").await?;

        let ma = svc.add_member(p.id, alice.id, ProjectRole::Owner).await?;
        svc.add_member(p.id, bob.id, ProjectRole::User).await?;
        svc.add_member(other.id, outsider.id, ProjectRole::User).await?;

        let mut members = svc.find_all_members(p.id).await?;
        // order is unspecified; sort for a stable assertion
        members.sort_by(|a, b| a.email.cmp(&b.email));
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].user_id, alice.id);
        assert_eq!(members[0].nickname, alice.nickname);
        assert_eq!(members[0].role, "OWNER");
        assert_eq!(members[0].project_member_id, ma.id);
        let alice_row = user::find_by_id(&db, alice.id).await?.unwrap();
        assert_eq!(members[0].created_at, alice_row.created_at);
        assert_eq!(members[1].user_id, bob.id);
        assert_eq!(members[1].role, "USER");

        assert!(svc.find_all_members(Uuid::new_v4()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_project_role_returns_none_without_membership() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let p = seed_project(&db, "coop").await?;

        assert_eq!(svc.get_project_role(alice.id, p.id).await?, None);
        svc.add_member(p.id, alice.id, ProjectRole::Admin).await?;
        assert_eq!(svc.get_project_role(alice.id, p.id).await?, Some(ProjectRole::Admin));
        Ok(())
    }

    #[tokio::test]
    async fn change_role_updates_matching_row() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let p = seed_project(&db, "coop").await?;
        svc.add_member(p.id, alice.id, ProjectRole::User).await?;
        svc.add_member(p.id, bob.id, ProjectRole::User).await?;

        svc.change_role(p.id, alice.id, ProjectRole::Admin).await?;
        assert_eq!(svc.get_project_role(alice.id, p.id).await?, Some(ProjectRole::Admin));
        assert_eq!(svc.get_project_role(bob.id, p.id).await?, Some(ProjectRole::User));
        Ok(())
    }

    #[tokio::test]
    async fn change_role_without_membership_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let p = seed_project(&db, "coop").await?;
        svc.add_member(p.id, alice.id, ProjectRole::User).await?;

        let err = svc.change_role(p.id, bob.id, ProjectRole::Admin).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
        // nothing else was touched
        assert_eq!(svc.get_project_role(alice.id, p.id).await?, Some(ProjectRole::User));
        assert_eq!(svc.get_project_role(bob.id, p.id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn kick_user_twice_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let p = seed_project(&db, "coop").await?;
        let m = svc.add_member(p.id, alice.id, ProjectRole::User).await?;

        svc.kick_user(m.id).await?;
        assert_eq!(svc.get_project_role(alice.id, p.id).await?, None);
        let err = svc.kick_user(m.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn add_member_rejects_duplicates_and_unknown_rows() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let p = seed_project(&db, "coop").await?;
        svc.add_member(p.id, alice.id, ProjectRole::User).await?;

        let err = svc.add_member(p.id, alice.id, ProjectRole::Admin).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        let err = svc.add_member(Uuid::new_v4(), alice.id, ProjectRole::User).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = svc.add_member(p.id, Uuid::new_v4(), ProjectRole::User).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_invitable_users_excludes_members() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let p = seed_project(&db, "coop").await?;

        let all = svc.list_invitable_users(p.id).await?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|u| !u.pending_invite));

        svc.add_member(p.id, alice.id, ProjectRole::Owner).await?;
        let rest = svc.list_invitable_users(p.id).await?;
        assert_eq!(rest.iter().map(|u| u.user.id).collect::<Vec<_>>(), vec![bob.id]);

        let err = svc.list_invitable_users(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_invitable_users_flags_pending_invites() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = MembershipService::new(db.clone());
        let alice = seed_user(&db, "alice").await?;
        let bob = seed_user(&db, "bob").await?;
        let carol = seed_user(&db, "carol").await?;
        let p = seed_project(&db, "coop").await?;
        let other = seed_project(&db, "elsewhere").await?;
        svc.add_member(p.id, alice.id, ProjectRole::Owner).await?;
        invite::create(&db, alice.id, bob.id, p.id).await?;
        // a pending invite to another project does not count
        invite::create(&db, alice.id, carol.id, other.id).await?;

        let listed = svc.list_invitable_users(p.id).await?;
        let flags: Vec<(Uuid, bool)> = listed.iter().map(|u| (u.user.id, u.pending_invite)).collect();
        assert_eq!(flags.len(), 2);
        assert!(flags.contains(&(bob.id, true)));
        assert!(flags.contains(&(carol.id, false)));

        // accepted or declined invites are no longer pending
        invite::Entity::update_many()
            .set(invite::ActiveModel { status: Set(InviteStatus::Declined), ..Default::default() })
            .filter(invite::Column::ReceiverId.eq(bob.id))
            .exec(&db)
            .await?;
        let listed = svc.list_invitable_users(p.id).await?;
        assert!(listed.iter().all(|u| !u.pending_invite));

        let err = svc.list_invitable_users(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
