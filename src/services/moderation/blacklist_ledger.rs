use serenity::all::UserId;
use sqlx::SqlitePool;
use tracing::info;

use crate::bot::error::Error;
use crate::db::tables::BlacklistSchema;
use crate::db::KeyedTable;

/// Outcome of a blacklist toggle.
///
/// `success` is false when the user was already in the requested state;
/// `blacklisted` is the state after the call either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlacklistFix {
    pub success: bool,
    pub blacklisted: bool,
}

/// Users barred from choosing their own region
pub struct BlacklistLedger {
    table: KeyedTable<BlacklistSchema>,
}

impl BlacklistLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table: KeyedTable::new(pool, BlacklistSchema),
        }
    }

    pub async fn create_table(&self) -> Result<(), Error> {
        self.table.create_table().await
    }

    pub async fn load_from_db(&self) -> Result<(), Error> {
        self.table.load_from_db().await.map(|_| ())
    }

    pub fn is_blacklisted(&self, user_id: UserId) -> bool {
        self.table.get(&user_id).unwrap_or(false)
    }

    pub async fn fix_blacklist(&self, user_id: UserId, add: bool) -> Result<BlacklistFix, Error> {
        let fix = self
            .table
            .update(user_id, |current| {
                let blacklisted = current.copied().unwrap_or(false);
                if blacklisted == add {
                    (None, BlacklistFix { success: false, blacklisted })
                } else {
                    (Some(add), BlacklistFix { success: true, blacklisted: add })
                }
            })
            .await?;

        if fix.success {
            info!(
                "User {} {} the region blacklist",
                user_id,
                if add { "added to" } else { "removed from" }
            );
        }

        Ok(fix)
    }

    pub fn blacklisted_users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self
            .table
            .entries()
            .into_iter()
            .filter_map(|(user, blacklisted)| blacklisted.then_some(user))
            .collect();
        users.sort();
        users
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::memory_pool;

    async fn ready_ledger() -> BlacklistLedger {
        let ledger = BlacklistLedger::new(memory_pool().await);
        assert_ok!(ledger.create_table().await);
        assert_ok!(ledger.load_from_db().await);
        ledger
    }

    #[tokio::test]
    async fn test_add_twice_is_a_no_op() {
        let ledger = ready_ledger().await;
        let user = UserId::new(1);

        let first = ledger.fix_blacklist(user, true).await.unwrap();
        let second = ledger.fix_blacklist(user, true).await.unwrap();

        assert_eq!(first, BlacklistFix { success: true, blacklisted: true });
        assert_eq!(second, BlacklistFix { success: false, blacklisted: true });
        assert!(ledger.is_blacklisted(user));
    }

    #[tokio::test]
    async fn test_remove_never_blacklisted() {
        let ledger = ready_ledger().await;
        let fix = ledger.fix_blacklist(UserId::new(2), false).await.unwrap();
        assert_eq!(fix, BlacklistFix { success: false, blacklisted: false });
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let ledger = ready_ledger().await;
        let user = UserId::new(3);

        ledger.fix_blacklist(user, true).await.unwrap();
        let removed = ledger.fix_blacklist(user, false).await.unwrap();

        assert_eq!(removed, BlacklistFix { success: true, blacklisted: false });
        assert!(!ledger.is_blacklisted(user));
        assert!(ledger.blacklisted_users().is_empty());
    }

    #[tokio::test]
    async fn test_blacklisted_users_sorted() {
        let ledger = ready_ledger().await;
        for id in [30u64, 10, 20] {
            ledger.fix_blacklist(UserId::new(id), true).await.unwrap();
        }
        ledger.fix_blacklist(UserId::new(20), false).await.unwrap();

        assert_eq!(
            ledger.blacklisted_users(),
            vec![UserId::new(10), UserId::new(30)]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_succeed_once() {
        let pool = memory_pool().await;
        let ledger = Arc::new(BlacklistLedger::new(pool.clone()));
        assert_ok!(ledger.create_table().await);
        assert_ok!(ledger.load_from_db().await);
        let user = UserId::new(11);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.fix_blacklist(user, true).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            let fix = handle.await.unwrap().unwrap();
            assert!(fix.blacklisted);
            if fix.success {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        let reloaded = BlacklistLedger::new(pool);
        assert_ok!(reloaded.load_from_db().await);
        assert_eq!(reloaded.blacklisted_users(), vec![user]);
    }
}
