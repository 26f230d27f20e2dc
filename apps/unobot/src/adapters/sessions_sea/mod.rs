//! SeaORM adapter for the uno_sessions table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::uno_sessions;

pub mod dto;

pub use dto::{SessionCreate, SessionUpdate};

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
    channel_id: &str,
) -> Result<Option<uno_sessions::Model>, sea_orm::DbErr> {
    uno_sessions::Entity::find()
        .filter(uno_sessions::Column::GuildId.eq(guild_id))
        .filter(uno_sessions::Column::ChannelId.eq(channel_id))
        .one(conn)
        .await
}

pub async fn find_by_guild<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
) -> Result<Vec<uno_sessions::Model>, sea_orm::DbErr> {
    uno_sessions::Entity::find()
        .filter(uno_sessions::Column::GuildId.eq(guild_id))
        .order_by_asc(uno_sessions::Column::Id)
        .all(conn)
        .await
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<uno_sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session = uno_sessions::ActiveModel {
        id: NotSet,
        guild_id: Set(dto.guild_id),
        channel_id: Set(dto.channel_id),
        active: Set(dto.active),
        intermission: Set(dto.intermission),
        players: Set(dto.players),
        hands: Set(dto.hands),
        draw_pile: Set(dto.draw_pile),
        discard_pile: Set(dto.discard_pile),
        direction: Set(dto.direction),
        turn: Set(dto.turn),
        uno: Set(dto.uno),
        scores: Set(dto.scores),
        created_at: Set(now),
        updated_at: Set(now),
    };

    session.insert(conn).await
}

/// Write only the columns present in `dto`, plus `updated_at`.
pub async fn update_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionUpdate,
) -> Result<(), sea_orm::DbErr> {
    use uno_sessions::Column;

    let now = time::OffsetDateTime::now_utc();
    let mut update = uno_sessions::Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::val(now).into());

    if let Some(active) = dto.active {
        update = update.col_expr(Column::Active, Expr::val(active).into());
    }
    if let Some(intermission) = dto.intermission {
        update = update.col_expr(Column::Intermission, Expr::val(intermission).into());
    }
    if let Some(players) = dto.players {
        update = update.col_expr(Column::Players, Expr::val(players).into());
    }
    if let Some(hands) = dto.hands {
        update = update.col_expr(Column::Hands, Expr::val(hands).into());
    }
    if let Some(pile) = dto.draw_pile {
        update = update.col_expr(Column::DrawPile, Expr::val(pile).into());
    }
    if let Some(pile) = dto.discard_pile {
        update = update.col_expr(Column::DiscardPile, Expr::val(pile).into());
    }
    if let Some(direction) = dto.direction {
        update = update.col_expr(Column::Direction, Expr::val(direction).into());
    }
    if let Some(turn) = dto.turn {
        update = update.col_expr(Column::Turn, Expr::val(turn).into());
    }
    if let Some(uno) = dto.uno {
        update = update.col_expr(Column::Uno, Expr::val(uno).into());
    }
    if let Some(scores) = dto.scores {
        update = update.col_expr(Column::Scores, Expr::val(scores).into());
    }

    let result = update
        .filter(Column::GuildId.eq(dto.guild_id.as_str()))
        .filter(Column::ChannelId.eq(dto.channel_id.as_str()))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "uno session {}/{}",
            dto.guild_id, dto.channel_id
        )));
    }
    Ok(())
}
