use std::marker::PhantomData;

use serenity::all::{ChannelId, GuildId, RoleId};
use sqlx::sqlite::SqliteRow;

use crate::db::keyed_table::{decode_snowflake, Column, Snowflake, SqliteQuery, TableSchema};

const VALUE_COLUMNS: &[Column] = &[Column::new("value_id", "INTEGER NOT NULL")];

/// One per-guild id setting: `guild_id -> value_id`.
///
/// The trash channel, mute channel and mute role tables all share this shape
/// and differ only in name and id type.
pub struct GuildSettingSchema<Id> {
    table: &'static str,
    _id: PhantomData<fn() -> Id>,
}

impl<Id: Snowflake> GuildSettingSchema<Id> {
    pub const fn new(table: &'static str) -> Self {
        Self {
            table,
            _id: PhantomData,
        }
    }
}

impl GuildSettingSchema<ChannelId> {
    pub const fn trash_channels() -> Self {
        Self::new("trash_channels")
    }

    pub const fn mute_channels() -> Self {
        Self::new("mute_channels")
    }
}

impl GuildSettingSchema<RoleId> {
    pub const fn mute_roles() -> Self {
        Self::new("mute_roles")
    }
}

impl<Id: Snowflake> TableSchema for GuildSettingSchema<Id> {
    type Key = GuildId;
    type Value = Id;

    fn table_name(&self) -> &'static str {
        self.table
    }

    fn key_column(&self) -> &'static str {
        "guild_id"
    }

    fn value_columns(&self) -> &'static [Column] {
        VALUE_COLUMNS
    }

    fn decode_value(&self, row: &SqliteRow) -> Result<Id, sqlx::Error> {
        decode_snowflake(row, "value_id")
    }

    fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &Id) -> SqliteQuery<'q> {
        query.bind(value.raw() as i64)
    }
}
