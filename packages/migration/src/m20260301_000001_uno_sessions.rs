use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UnoSessions {
    Table,
    Id,
    GuildId,
    ChannelId,
    Active,
    Intermission,
    Players,
    Hands,
    DrawPile,
    DiscardPile,
    Direction,
    Turn,
    Uno,
    Scores,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UnoSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnoSessions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(UnoSessions::GuildId).string().not_null())
                    .col(ColumnDef::new(UnoSessions::ChannelId).string().not_null())
                    .col(
                        ColumnDef::new(UnoSessions::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UnoSessions::Intermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // One JSON column per session document field
                    .col(ColumnDef::new(UnoSessions::Players).json_binary().not_null())
                    .col(ColumnDef::new(UnoSessions::Hands).json_binary().not_null())
                    .col(ColumnDef::new(UnoSessions::DrawPile).json_binary().not_null())
                    .col(
                        ColumnDef::new(UnoSessions::DiscardPile)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnoSessions::Direction)
                            .string()
                            .not_null()
                            .default("forward"),
                    )
                    .col(ColumnDef::new(UnoSessions::Turn).json_binary().null())
                    .col(ColumnDef::new(UnoSessions::Uno).json_binary().not_null())
                    .col(ColumnDef::new(UnoSessions::Scores).json_binary().not_null())
                    .col(
                        ColumnDef::new(UnoSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnoSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One session per channel
        manager
            .create_index(
                Index::create()
                    .name("ux_uno_sessions_guild_channel")
                    .table(UnoSessions::Table)
                    .col(UnoSessions::GuildId)
                    .col(UnoSessions::ChannelId)
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
                    .name("ux_uno_sessions_guild_channel")
                    .table(UnoSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UnoSessions::Table).to_owned())
            .await?;

        Ok(())
    }
}
