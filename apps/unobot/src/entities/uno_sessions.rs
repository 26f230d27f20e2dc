use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// One row per (guild, channel) session document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uno_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "guild_id")]
    pub guild_id: String,
    #[sea_orm(column_name = "channel_id")]
    pub channel_id: String,
    pub active: bool,
    pub intermission: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub players: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub hands: Json,
    #[sea_orm(column_name = "draw_pile", column_type = "JsonBinary")]
    pub draw_pile: Json,
    #[sea_orm(column_name = "discard_pile", column_type = "JsonBinary")]
    pub discard_pile: Json,
    pub direction: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub turn: Option<Json>,
    #[sea_orm(column_type = "JsonBinary")]
    pub uno: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub scores: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
