use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ProjectMember: one row per (project, user)
        manager
            .create_index(
                Index::create()
                    .name("uniq_project_member_project_user")
                    .table(ProjectMember::Table)
                    .col(ProjectMember::ProjectId)
                    .col(ProjectMember::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Invite: pending lookups by receiver
        manager
            .create_index(
                Index::create()
                    .name("idx_invite_receiver_status")
                    .table(Invite::Table)
                    .col(Invite::ReceiverId)
                    .col(Invite::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_project_member_project_user").table(ProjectMember::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invite_receiver_status").table(Invite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectMember { Table, ProjectId, UserId }

#[derive(DeriveIden)]
enum Invite { Table, ReceiverId, Status }
