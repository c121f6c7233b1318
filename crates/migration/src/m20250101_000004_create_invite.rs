//! Create `invite` table: sender asks receiver to join a project.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invite::Table)
                    .if_not_exists()
                    .col(uuid(Invite::Id).primary_key())
                    .col(uuid(Invite::SenderId).not_null())
                    .col(uuid(Invite::ReceiverId).not_null())
                    .col(uuid(Invite::ProjectId).not_null())
                    .col(string_len(Invite::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Invite::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invite_sender")
                            .from(Invite::Table, Invite::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invite_receiver")
                            .from(Invite::Table, Invite::ReceiverId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invite_project")
                            .from(Invite::Table, Invite::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Invite::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Invite { Table, Id, SenderId, ReceiverId, ProjectId, Status, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Project { Table, Id }
