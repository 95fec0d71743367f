use chrono::{DateTime, Utc};
use serenity::all::UserId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::keyed_table::{decode_snowflake, Column, SqliteQuery, TableSchema};
use crate::db::models::MuteRecord;

const VALUE_COLUMNS: &[Column] = &[
    Column::new("until", "TEXT NOT NULL"),
    Column::new("voluntary", "BOOLEAN NOT NULL"),
];

/// `user_id -> (until, voluntary)`
pub struct MuteSchema;

impl TableSchema for MuteSchema {
    type Key = UserId;
    type Value = MuteRecord;

    fn table_name(&self) -> &'static str {
        "mutes"
    }

    fn key_column(&self) -> &'static str {
        "user_id"
    }

    fn value_columns(&self) -> &'static [Column] {
        VALUE_COLUMNS
    }

    fn decode_value(&self, row: &SqliteRow) -> Result<MuteRecord, sqlx::Error> {
        Ok(MuteRecord {
            user_id: decode_snowflake(row, "user_id")?,
            until: row.try_get::<DateTime<Utc>, _>("until")?,
            voluntary: row.try_get("voluntary")?,
        })
    }

    fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &MuteRecord) -> SqliteQuery<'q> {
        query.bind(value.until).bind(value.voluntary)
    }
}
