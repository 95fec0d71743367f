use serenity::all::UserId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::keyed_table::{Column, SqliteQuery, TableSchema};

const VALUE_COLUMNS: &[Column] = &[Column::new("blacklisted", "BOOLEAN NOT NULL")];

/// `user_id -> blacklisted`: users barred from picking their own region
pub struct BlacklistSchema;

impl TableSchema for BlacklistSchema {
    type Key = UserId;
    type Value = bool;

    fn table_name(&self) -> &'static str {
        "region_blacklist"
    }

    fn key_column(&self) -> &'static str {
        "user_id"
    }

    fn value_columns(&self) -> &'static [Column] {
        VALUE_COLUMNS
    }

    fn decode_value(&self, row: &SqliteRow) -> Result<bool, sqlx::Error> {
        row.try_get("blacklisted")
    }

    fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &bool) -> SqliteQuery<'q> {
        query.bind(*value)
    }

    fn default_value(&self) -> Option<bool> {
        Some(false)
    }
}
