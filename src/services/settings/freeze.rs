use serenity::all::GuildId;
use sqlx::SqlitePool;
use tracing::info;

use crate::bot::error::Error;
use crate::db::tables::FreezeMuteSchema;
use crate::db::KeyedTable;

/// Per-guild flag that silences the bot
pub struct FreezeMutes {
    table: KeyedTable<FreezeMuteSchema>,
}

impl FreezeMutes {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table: KeyedTable::new(pool, FreezeMuteSchema),
        }
    }

    pub async fn create_table(&self) -> Result<(), Error> {
        self.table.create_table().await
    }

    pub async fn load_from_db(&self) -> Result<(), Error> {
        self.table.load_from_db().await.map(|_| ())
    }

    pub fn is_freeze_muted(&self, guild_id: GuildId) -> bool {
        self.table.get(&guild_id).unwrap_or(false)
    }

    /// Flip the flag and return the new state
    pub async fn toggle_freeze_mute(&self, guild_id: GuildId) -> Result<bool, Error> {
        let muted = self
            .table
            .update(guild_id, |current| {
                let next = !current.copied().unwrap_or(false);
                (Some(next), next)
            })
            .await?;

        info!("Guild {} freeze mute is now {}", guild_id, muted);
        Ok(muted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::pool::memory_pool;

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let pool = memory_pool().await;
        let freeze = FreezeMutes::new(pool);
        freeze.create_table().await.unwrap();
        freeze.load_from_db().await.unwrap();

        let guild = GuildId::new(4);
        assert!(!freeze.is_freeze_muted(guild));
        assert!(freeze.toggle_freeze_mute(guild).await.unwrap());
        assert!(freeze.is_freeze_muted(guild));
        assert!(!freeze.toggle_freeze_mute(guild).await.unwrap());
        assert!(!freeze.is_freeze_muted(guild));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_are_not_lost() {
        let pool = memory_pool().await;
        let freeze = Arc::new(FreezeMutes::new(pool.clone()));
        freeze.create_table().await.unwrap();
        freeze.load_from_db().await.unwrap();
        let guild = GuildId::new(8);

        let handles: Vec<_> = (0..51)
            .map(|_| {
                let freeze = Arc::clone(&freeze);
                tokio::spawn(async move { freeze.toggle_freeze_mute(guild).await })
            })
            .collect();

        let mut turned_on = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                turned_on += 1;
            }
        }

        assert_eq!(turned_on, 26);
        assert!(freeze.is_freeze_muted(guild));

        let reloaded = FreezeMutes::new(pool);
        reloaded.load_from_db().await.unwrap();
        assert!(reloaded.is_freeze_muted(guild));
    }
}
