//! Generic persistent key -> value table with an in-memory mirror.
//!
//! Every table lives in the shared SQLite file. After `create_table` and
//! `load_from_db` have run, reads are served from the mirror only; writes go
//! to SQLite first and reach the mirror only once the write has succeeded.
//! Writers of one table are serialized so the mirror can never get ahead of,
//! or fall behind, the stored row.

use std::fmt::Debug;
use std::hash::Hash;

use dashmap::DashMap;
use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row, Sqlite};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::bot::error::Error;

pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Discord identifier that can be stored as an SQLite integer
pub trait Snowflake: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// `None` for zero, which Discord never hands out
    fn from_raw(raw: u64) -> Option<Self>;
    fn raw(self) -> u64;
}

impl Snowflake for GuildId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| GuildId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

impl Snowflake for UserId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| UserId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

impl Snowflake for ChannelId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| ChannelId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

impl Snowflake for RoleId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| RoleId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

/// Decode a stored integer column back into an id
pub fn decode_snowflake<T: Snowflake>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    T::from_raw(raw as u64).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("{} is not a valid id", raw).into(),
    })
}

/// A value column of a table, e.g. `Column::new("until", "TEXT NOT NULL")`
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub decl: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, decl: &'static str) -> Self {
        Self { name, decl }
    }
}

/// Shape of one table: its key, its value columns, and how a value maps onto them
pub trait TableSchema: Send + Sync + 'static {
    type Key: Snowflake;
    type Value: Clone + Send + Sync + 'static;

    fn table_name(&self) -> &'static str;

    fn key_column(&self) -> &'static str;

    fn value_columns(&self) -> &'static [Column];

    fn decode_value(&self, row: &SqliteRow) -> Result<Self::Value, sqlx::Error>;

    /// Bind the value columns, in `value_columns` order
    fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &Self::Value) -> SqliteQuery<'q>;

    /// Returned by `get` for keys that have never been written
    fn default_value(&self) -> Option<Self::Value> {
        None
    }
}

pub struct KeyedTable<S: TableSchema> {
    pool: SqlitePool,
    schema: S,
    mirror: DashMap<S::Key, S::Value>,
    write_lock: Mutex<()>,
    create_sql: String,
    select_sql: String,
    upsert_sql: String,
}

impl<S: TableSchema> KeyedTable<S> {
    pub fn new(pool: SqlitePool, schema: S) -> Self {
        let table = schema.table_name();
        let key = schema.key_column();
        let columns = schema.value_columns();

        let column_decls = columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.decl))
            .collect::<Vec<_>>()
            .join(", ");
        let column_names = columns.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
        let placeholders = vec!["?"; columns.len() + 1].join(", ");
        let updates = columns
            .iter()
            .map(|c| format!("{0} = excluded.{0}", c.name))
            .collect::<Vec<_>>()
            .join(", ");

        let create_sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY NOT NULL, {})",
            table, key, column_decls
        );
        let select_sql = format!("SELECT {}, {} FROM {}", key, column_names, table);
        let upsert_sql = format!(
            "INSERT INTO {} ({}, {}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            table, key, column_names, placeholders, key, updates
        );

        Self {
            pool,
            schema,
            mirror: DashMap::new(),
            write_lock: Mutex::new(()),
            create_sql,
            select_sql,
            upsert_sql,
        }
    }

    pub fn name(&self) -> &'static str {
        self.schema.table_name()
    }

    /// Ensure the backing table exists. Safe to call on every startup.
    pub async fn create_table(&self) -> Result<(), Error> {
        sqlx::query(&self.create_sql).execute(&self.pool).await?;
        debug!("Table {} ready", self.name());
        Ok(())
    }

    /// Replace the mirror with every stored row.
    ///
    /// Holds the write lock across the read and the swap, so a write cannot
    /// land between them and be dropped. Rows are decoded before the mirror is
    /// touched, so a failure leaves the previous mirror intact.
    pub async fn load_from_db(&self) -> Result<usize, Error> {
        let _guard = self.write_lock.lock().await;
        let rows = sqlx::query(&self.select_sql).fetch_all(&self.pool).await?;

        let entries = rows
            .iter()
            .map(|row| self.decode_row(row))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        self.mirror.clear();
        for (key, value) in entries {
            self.mirror.insert(key, value);
        }

        info!("Loaded {} entries from table {}", self.mirror.len(), self.name());
        Ok(self.mirror.len())
    }

    fn decode_row(&self, row: &SqliteRow) -> Result<(S::Key, S::Value), sqlx::Error> {
        let key = decode_snowflake(row, self.schema.key_column())?;
        let value = self.schema.decode_value(row)?;
        Ok((key, value))
    }

    /// Mirrored value for `key`, or the table default
    pub fn get(&self, key: &S::Key) -> Option<S::Value> {
        self.mirror
            .get(key)
            .map(|entry| entry.value().clone())
            .or_else(|| self.schema.default_value())
    }

    pub fn len(&self) -> usize {
        self.mirror.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty()
    }

    /// Snapshot of every mirrored entry
    pub fn entries(&self) -> Vec<(S::Key, S::Value)> {
        self.mirror
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub async fn set(&self, key: S::Key, value: S::Value) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;
        self.write_through(key, value).await
    }

    pub async fn set_by_id(&self, raw_id: u64, value: S::Value) -> Result<(), Error> {
        let key = S::Key::from_raw(raw_id).ok_or(Error::InvalidId(raw_id))?;
        self.set(key, value).await
    }

    /// Read-modify-write under the table's write lock.
    ///
    /// `decide` sees the currently stored value (not the default) and returns
    /// the value to write, if any, plus a result handed back to the caller.
    pub async fn update<T, F>(&self, key: S::Key, decide: F) -> Result<T, Error>
    where
        F: FnOnce(Option<&S::Value>) -> (Option<S::Value>, T),
    {
        let _guard = self.write_lock.lock().await;

        let current = self.mirror.get(&key).map(|entry| entry.value().clone());
        let (next, outcome) = decide(current.as_ref());

        if let Some(next) = next {
            self.write_through(key, next).await?;
        }

        Ok(outcome)
    }

    async fn write_through(&self, key: S::Key, value: S::Value) -> Result<(), Error> {
        let query = sqlx::query(&self.upsert_sql).bind(key.raw() as i64);
        let query = self.schema.bind_value(query, &value);
        query.execute(&self.pool).await?;

        self.mirror.insert(key, value);
        debug!("Wrote {:?} to table {}", key, self.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::pool::memory_pool;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        score: i64,
        text: String,
    }

    struct NoteSchema;

    const NOTE_COLUMNS: &[Column] = &[
        Column::new("score", "INTEGER NOT NULL"),
        Column::new("text", "TEXT NOT NULL"),
    ];

    impl TableSchema for NoteSchema {
        type Key = UserId;
        type Value = Note;

        fn table_name(&self) -> &'static str {
            "notes"
        }

        fn key_column(&self) -> &'static str {
            "user_id"
        }

        fn value_columns(&self) -> &'static [Column] {
            NOTE_COLUMNS
        }

        fn decode_value(&self, row: &SqliteRow) -> Result<Note, sqlx::Error> {
            Ok(Note {
                score: row.try_get("score")?,
                text: row.try_get("text")?,
            })
        }

        fn bind_value<'q>(&self, query: SqliteQuery<'q>, value: &Note) -> SqliteQuery<'q> {
            query.bind(value.score).bind(value.text.clone())
        }
    }

    fn note(score: i64, text: &str) -> Note {
        Note {
            score,
            text: text.to_string(),
        }
    }

    async fn ready_table(pool: &SqlitePool) -> KeyedTable<NoteSchema> {
        let table = KeyedTable::new(pool.clone(), NoteSchema);
        table.create_table().await.unwrap();
        table.load_from_db().await.unwrap();
        table
    }

    #[tokio::test]
    async fn test_create_table_is_idempotent() {
        let pool = memory_pool().await;
        let table = KeyedTable::new(pool, NoteSchema);
        table.create_table().await.unwrap();
        table.create_table().await.unwrap();
        assert_eq!(table.load_from_db().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_absent_key_returns_default() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;
        assert_eq!(table.get(&UserId::new(1)), None);
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_key() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;
        let user = UserId::new(7);

        table.set(user, note(1, "first")).await.unwrap();
        table.set(user, note(2, "second")).await.unwrap();

        assert_eq!(table.get(&user), Some(note(2, "second")));
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_reconstructs_mapping() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;

        for i in 1..=25u64 {
            table
                .set(UserId::new(i), note(i as i64 * 10, &format!("user {}", i)))
                .await
                .unwrap();
        }

        let reloaded = KeyedTable::new(pool.clone(), NoteSchema);
        reloaded.create_table().await.unwrap();
        assert_eq!(reloaded.load_from_db().await.unwrap(), 25);

        let mut before = table.entries();
        let mut after = reloaded.entries();
        before.sort_by_key(|(k, _)| *k);
        after.sort_by_key(|(k, _)| *k);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_value() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;
        let user = UserId::new(3);

        table.set(user, note(1, "kept")).await.unwrap();
        sqlx::query("DROP TABLE notes").execute(&pool).await.unwrap();

        let result = table.set(user, note(2, "lost")).await;
        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
        assert_eq!(table.get(&user), Some(note(1, "kept")));
    }

    #[tokio::test]
    async fn test_failed_load_leaves_mirror_untouched() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;
        table.set(UserId::new(5), note(5, "five")).await.unwrap();

        sqlx::query("INSERT INTO notes (user_id, score, text) VALUES (0, 1, 'bad')")
            .execute(&pool)
            .await
            .unwrap();

        assert!(table.load_from_db().await.is_err());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&UserId::new(5)), Some(note(5, "five")));
    }

    #[tokio::test]
    async fn test_set_by_id() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;

        table.set_by_id(42, note(4, "raw")).await.unwrap();
        assert_eq!(table.get(&UserId::new(42)), Some(note(4, "raw")));

        let zero = table.set_by_id(0, note(0, "zero")).await;
        assert!(matches!(zero, Err(Error::InvalidId(0))));
    }

    #[tokio::test]
    async fn test_update_without_write_leaves_table_alone() {
        let pool = memory_pool().await;
        let table = ready_table(&pool).await;
        let user = UserId::new(9);

        let seen = table
            .update(user, |current| (None, current.is_some()))
            .await
            .unwrap();
        assert!(!seen);
        assert_eq!(table.get(&user), None);

        let wrote = table
            .update(user, |_| (Some(note(9, "nine")), true))
            .await
            .unwrap();
        assert!(wrote);
        assert_eq!(table.get(&user), Some(note(9, "nine")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reload_racing_writes_keeps_every_write() {
        let pool = memory_pool().await;
        let table = Arc::new(ready_table(&pool).await);

        let mut handles = Vec::new();
        for i in 1..=20u64 {
            let writer = Arc::clone(&table);
            handles.push(tokio::spawn(async move {
                writer.set(UserId::new(i), note(i as i64, "raced")).await.map(|_| ())
            }));
            let loader = Arc::clone(&table);
            handles.push(tokio::spawn(async move {
                loader.load_from_db().await.map(|_| ())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(table.len(), 20);
        let reloaded = KeyedTable::new(pool.clone(), NoteSchema);
        assert_eq!(reloaded.load_from_db().await.unwrap(), 20);

        let mut mirrored = table.entries();
        let mut stored = reloaded.entries();
        mirrored.sort_by_key(|(k, _)| *k);
        stored.sort_by_key(|(k, _)| *k);
        assert_eq!(mirrored, stored);
    }
}
