use serenity::all::GuildId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::keyed_table::{Column, SqliteQuery, TableSchema};

const VALUE_COLUMNS: &[Column] = &[Column::new("muted", "BOOLEAN NOT NULL")];

/// `guild_id -> muted`: whether the bot has been told to keep quiet in a guild
pub struct FreezeMuteSchema;

impl TableSchema for FreezeMuteSchema {
    type Key = GuildId;
    type Value = bool;

    fn table_name(&self) -> &'static str {
        "freeze_mutes"
    }

    fn key_column(&self) -> &'static str {
        "guild_id"
    }

    fn value_columns(&self) -> &'static [Column] {
        VALUE_COLUMNS
    }

    fn decode_value(&self, row: &SqliteRow) -> Result<bool, sqlx::Error> {
        row.try_get("muted")
    }

    fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &bool) -> SqliteQuery<'q> {
        query.bind(*value)
    }

    fn default_value(&self) -> Option<bool> {
        Some(false)
    }
}
