use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::errors::ModelError;
use models::{invite, project, project_member, user, InviteStatus, ProjectRole};

use super::domain::InviteView;
use crate::errors::ServiceError;

pub struct InviteService {
    db: DatabaseConnection,
}

impl InviteService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Record a `PENDING` invite. Repeated invites for the same pair are kept as
    /// separate rows.
    #[instrument(skip(self))]
    pub async fn send_invite(&self, sender_id: Uuid, receiver_id: Uuid, project_id: Uuid) -> Result<invite::Model, ServiceError> {
        if sender_id == receiver_id {
            return Err(ServiceError::Validation("cannot invite yourself".into()));
        }
        if user::find_by_id(&self.db, receiver_id).await?.is_none() {
            return Err(ServiceError::not_found("receiver"));
        }
        if user::find_by_id(&self.db, sender_id).await?.is_none() {
            return Err(ServiceError::not_found("sender"));
        }
        if project::Entity::find_by_id(project_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::not_found("project"));
        }
        let created = invite::create(&self.db, sender_id, receiver_id, project_id).await?;
        info!(invite_id = %created.id, "invite_sent");
        Ok(created)
    }

    pub async fn has_pending_invite(&self, user_id: Uuid) -> Result<bool, ServiceError> {
        Ok(invite::count_pending_for_receiver(&self.db, user_id).await? > 0)
    }

    /// Pending invites addressed to `user_id`, newest first.
    pub async fn list_pending_invites(&self, user_id: Uuid) -> Result<Vec<InviteView>, ServiceError> {
        let rows = invite::Entity::find()
            .filter(invite::Column::ReceiverId.eq(user_id))
            .filter(invite::Column::Status.eq(InviteStatus::Pending))
            .order_by_desc(invite::Column::CreatedAt)
            .find_also_related(project::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(i, p)| InviteView::from_parts(i, p)).collect())
    }

    /// Accept a pending invite and add its receiver to the project as `USER`.
    ///
    /// Both writes share one transaction; if the receiver is already a member
    /// the invite stays `PENDING`.
    #[instrument(skip(self))]
    pub async fn accept_invite(&self, invite_id: Uuid) -> Result<project_member::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let pending = transition(&txn, invite_id, InviteStatus::Accepted).await?;
        let member = project_member::create(&txn, pending.project_id, pending.receiver_id, ProjectRole::User)
            .await
            .map_err(|e| match e {
                ModelError::Conflict(_) => ServiceError::conflict("project member"),
                other => other.into(),
            })?;
        txn.commit().await?;
        info!(project_member_id = %member.id, "invite_accepted");
        Ok(member)
    }

    #[instrument(skip(self))]
    pub async fn decline_invite(&self, invite_id: Uuid) -> Result<(), ServiceError> {
        transition(&self.db, invite_id, InviteStatus::Declined).await?;
        info!("invite_declined");
        Ok(())
    }
}

/// Move a `PENDING` invite to `next`, returning the invite as it was read.
///
/// The update is guarded on the current status so two concurrent callers
/// cannot both leave `PENDING`.
async fn transition<C: ConnectionTrait>(db: &C, invite_id: Uuid, next: InviteStatus) -> Result<invite::Model, ServiceError> {
    let found = invite::Entity::find_by_id(invite_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("invite"))?;
    if found.status != InviteStatus::Pending {
        return Err(ServiceError::Validation(format!("invite is already {}", found.status)));
    }
    let res = invite::Entity::update_many()
        .set(invite::ActiveModel { status: Set(next), ..Default::default() })
        .filter(invite::Column::Id.eq(invite_id))
        .filter(invite::Column::Status.eq(InviteStatus::Pending))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        warn!(%invite_id, "invite left PENDING concurrently");
        return Err(ServiceError::Validation("invite is no longer pending".into()));
    }
    Ok(found)
}
