use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    Name,
    Active,
    CreatedAt,
}

#[derive(Iden)]
enum Fixtures {
    Table,
    Id,
    RoundId,
    Position,
    Home,
    Away,
    CreatedAt,
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    RoundId,
    ParticipantId,
    DisplayName,
    Handle,
    PicksJson,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rounds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Rounds::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_active")
                    .table(Rounds::Table)
                    .col(Rounds::Active)
                    .to_owned(),
            )
            .await?;

        // fixtures
        manager
            .create_table(
                Table::create()
                    .table(Fixtures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fixtures::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Fixtures::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Fixtures::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Fixtures::Home).string().not_null())
                    .col(ColumnDef::new(Fixtures::Away).string().not_null())
                    .col(
                        ColumnDef::new(Fixtures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fixtures_round_id")
                            .from(Fixtures::Table, Fixtures::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_fixtures_round_position")
                    .table(Fixtures::Table)
                    .col(Fixtures::RoundId)
                    .col(Fixtures::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // submissions
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Submissions::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::DisplayName).string().not_null())
                    .col(ColumnDef::new(Submissions::Handle).string().null())
                    .col(
                        ColumnDef::new(Submissions::PicksJson)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_round_id")
                            .from(Submissions::Table, Submissions::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The at-most-once guarantee lives here, not in application code.
        manager
            .create_index(
                Index::create()
                    .name("ux_submissions_round_participant")
                    .table(Submissions::Table)
                    .col(Submissions::RoundId)
                    .col(Submissions::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ux_submissions_round_participant")
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_fixtures_round_position")
                    .table(Fixtures::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Fixtures::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_rounds_active")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        Ok(())
    }
}
