use chrono::{DateTime, Utc};
use serenity::all::UserId;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::bot::error::Error;
use crate::db::models::MuteRecord;
use crate::db::tables::MuteSchema;
use crate::db::KeyedTable;

/// Result of asking the ledger to mute someone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuteFix {
    /// No active mute existed; the new one was recorded
    Installed,
    /// An active punitive mute was replaced, whatever its remaining time
    Replaced { previous: MuteRecord },
    /// Voluntary request against an active mute; nothing was written
    AlreadyMuted { until: DateTime<Utc> },
}

impl MuteFix {
    pub fn is_success(&self) -> bool {
        !matches!(self, MuteFix::AlreadyMuted { .. })
    }

    pub fn reason(&self) -> &'static str {
        match self {
            MuteFix::Installed => "Mute recorded.",
            MuteFix::Replaced { .. } => "Existing mute replaced.",
            MuteFix::AlreadyMuted { .. } => "User is already muted.",
        }
    }
}

/// One mute record per user, kept after expiry
pub struct MuteLedger {
    table: KeyedTable<MuteSchema>,
}

impl MuteLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table: KeyedTable::new(pool, MuteSchema),
        }
    }

    pub async fn create_table(&self) -> Result<(), Error> {
        self.table.create_table().await
    }

    pub async fn load_from_db(&self) -> Result<(), Error> {
        self.table.load_from_db().await.map(|_| ())
    }

    pub async fn fix_mute(
        &self,
        user_id: UserId,
        until: DateTime<Utc>,
        voluntary: bool,
    ) -> Result<MuteFix, Error> {
        self.fix_mute_at(user_id, until, voluntary, Utc::now()).await
    }

    /// Record a mute lasting until `until`, judged against `now`.
    ///
    /// Punitive mutes always overwrite, so a later, shorter punitive mute
    /// replaces a longer one. Voluntary mutes never touch an active mute.
    pub async fn fix_mute_at(
        &self,
        user_id: UserId,
        until: DateTime<Utc>,
        voluntary: bool,
        now: DateTime<Utc>,
    ) -> Result<MuteFix, Error> {
        let record = MuteRecord {
            user_id,
            until,
            voluntary,
        };

        let fix = self
            .table
            .update(user_id, move |current| match current {
                Some(existing) if existing.is_active_at(now) => {
                    if voluntary {
                        (None, MuteFix::AlreadyMuted { until: existing.until })
                    } else {
                        let previous = existing.clone();
                        (Some(record), MuteFix::Replaced { previous })
                    }
                }
                _ => (Some(record), MuteFix::Installed),
            })
            .await?;

        match &fix {
            MuteFix::AlreadyMuted { until } => {
                debug!("Refused voluntary mute for {}: muted until {}", user_id, until)
            }
            _ => info!(
                "User {} muted until {} (voluntary: {})",
                user_id, until, voluntary
            ),
        }

        Ok(fix)
    }

    pub fn get(&self, user_id: UserId) -> Option<MuteRecord> {
        self.table.get(&user_id)
    }

    pub fn is_muted(&self, user_id: UserId) -> bool {
        self.is_muted_at(user_id, Utc::now())
    }

    pub fn is_muted_at(&self, user_id: UserId, now: DateTime<Utc>) -> bool {
        self.get(user_id)
            .map(|record| record.is_active_at(now))
            .unwrap_or(false)
    }

    /// Every mute still running at `now`, soonest expiry first
    pub fn active_mutes(&self, now: DateTime<Utc>) -> Vec<MuteRecord> {
        let mut active: Vec<MuteRecord> = self
            .table
            .entries()
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| record.is_active_at(now))
            .collect();
        active.sort_by_key(|record| record.until);
        active
    }
}
