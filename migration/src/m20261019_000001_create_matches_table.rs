use sea_orm_migration::prelude::*;

/// Creates the `matches` table holding one row per played game.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    GameId,
    #[sea_orm(iden = "player1_name")]
    Player1Name,
    #[sea_orm(iden = "player2_name")]
    Player2Name,
    #[sea_orm(iden = "player1_score")]
    Player1Score,
    #[sea_orm(iden = "player2_score")]
    Player2Score,
    Winner,
    Status,
    StartedAt,
    EndedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Matches::GameId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Matches::Player1Name).string().not_null())
                    .col(ColumnDef::new(Matches::Player2Name).string().not_null())
                    .col(
                        ColumnDef::new(Matches::Player1Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::Player2Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Matches::Winner).string().null())
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string_len(20)
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(
                        ColumnDef::new(Matches::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // History listing filters on status and sorts by start time
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_matches_status_started_at")
                    .table(Matches::Table)
                    .col(Matches::Status)
                    .col(Matches::StartedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}
