use chrono::{DateTime, Utc};
use serenity::all::{GuildId, UserId};
use tracing::{error, info, warn};

use crate::constants::timeouts::MuteTier;
use crate::services::moderation::outcome::{BatchOutcome, Rejection, TargetOutcome};
use crate::services::roles::RoleMutator;
use crate::services::settings::GuildDefaults;
use crate::services::store::SettingsStore;

/// Runs mutes and blacklist edits against the ledgers and the role collaborator.
///
/// Callers check the invoker's authority before getting here. Targets of a
/// batch are handled one after another, in the order given. Nothing is
/// retried: a failed role change is reported and left for a human.
pub struct ModerationCoordinator<'a> {
    store: &'a SettingsStore,
}

impl<'a> ModerationCoordinator<'a> {
    pub fn new(store: &'a SettingsStore) -> Self {
        Self { store }
    }

    /// Punitive mute of one user for the length of `tier`
    pub async fn impose_mute<R, D>(
        &self,
        roles: &R,
        defaults: &D,
        guild_id: GuildId,
        user_id: UserId,
        tier: MuteTier,
        reason: &str,
    ) -> TargetOutcome
    where
        R: RoleMutator,
        D: GuildDefaults,
    {
        let until = tier.until(Utc::now());
        self.impose_mute_until(roles, defaults, guild_id, user_id, until, false, reason)
            .await
    }

    pub async fn impose_mutes<R, D>(
        &self,
        roles: &R,
        defaults: &D,
        guild_id: GuildId,
        user_ids: &[UserId],
        tier: MuteTier,
        reason: &str,
    ) -> BatchOutcome
    where
        R: RoleMutator,
        D: GuildDefaults,
    {
        let mut batch = BatchOutcome::new();
        for &user_id in user_ids {
            batch.push(
                self.impose_mute(roles, defaults, guild_id, user_id, tier, reason)
                    .await,
            );
        }
        batch
    }

    /// Record the mute, then hand out the guild's mute role.
    ///
    /// A recorded mute is never rolled back. If the role cannot be applied the
    /// ledger still says the user is muted and the mismatch is logged.
    #[allow(clippy::too_many_arguments)]
    pub async fn impose_mute_until<R, D>(
        &self,
        roles: &R,
        defaults: &D,
        guild_id: GuildId,
        user_id: UserId,
        until: DateTime<Utc>,
        voluntary: bool,
        reason: &str,
    ) -> TargetOutcome
    where
        R: RoleMutator,
        D: GuildDefaults,
    {
        let fix = match self.store.mutes.fix_mute(user_id, until, voluntary).await {
            Ok(fix) => fix,
            Err(e) => {
                error!("Failed to record mute for user {}: {}", user_id, e);
                return TargetOutcome::failure(user_id, Rejection::StorageUnavailable(e.to_string()));
            }
        };

        if !fix.is_success() {
            return TargetOutcome::failure(user_id, Rejection::AlreadyMuted);
        }

        let Some(role_id) = self.store.guilds.resolve_mute_role(guild_id, defaults) else {
            warn!(
                "Mute for user {} recorded but guild {} has no mute role",
                user_id, guild_id
            );
            return TargetOutcome::failure(user_id, Rejection::NoMuteRole);
        };

        if let Err(e) = roles.assign_role(user_id, role_id, reason).await {
            warn!(
                "Mute for user {} recorded but role {} was not applied: {:?}",
                user_id, role_id, e
            );
            return TargetOutcome::failure(user_id, Rejection::RoleMutation(e));
        }

        info!("User {} muted in guild {} until {}", user_id, guild_id, until);
        TargetOutcome::success(user_id)
    }

    /// Add every target to, or remove every target from, the region blacklist
    pub async fn fix_blacklist(&self, user_ids: &[UserId], add: bool) -> BatchOutcome {
        let mut batch = BatchOutcome::new();

        for &user_id in user_ids {
            let outcome = match self.store.blacklist.fix_blacklist(user_id, add).await {
                Ok(fix) if fix.success => TargetOutcome::success(user_id),
                Ok(fix) => TargetOutcome::failure(
                    user_id,
                    Rejection::AlreadyInRequestedState {
                        blacklisted: fix.blacklisted,
                    },
                ),
                Err(e) => {
                    error!("Failed to update blacklist for user {}: {}", user_id, e);
                    TargetOutcome::failure(user_id, Rejection::StorageUnavailable(e.to_string()))
                }
            };
            batch.push(outcome);
        }

        batch
    }
}
