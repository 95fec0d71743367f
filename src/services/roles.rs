use std::future::Future;

use serenity::all::{Cache, ChannelId, EditMember, GuildId, Http, RoleId, UserId};
use tracing::debug;

use crate::bot::error::RoleMutationError;
use crate::constants::timeouts::DEFAULT_MUTE_ROLE_NAME;
use crate::services::settings::GuildDefaults;

/// Changes to a member's role set, performed outside the bot's own state
pub trait RoleMutator: Sync {
    fn assign_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> impl Future<Output = Result<(), RoleMutationError>> + Send;

    /// Replace the member's whole role set
    fn replace_roles(
        &self,
        user_id: UserId,
        role_ids: Vec<RoleId>,
        reason: &str,
    ) -> impl Future<Output = Result<(), RoleMutationError>> + Send;
}

/// Role mutation through the Discord HTTP API, scoped to one guild
pub struct DiscordRoles<'a> {
    http: &'a Http,
    guild_id: GuildId,
}

impl<'a> DiscordRoles<'a> {
    pub fn new(http: &'a Http, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

impl RoleMutator for DiscordRoles<'_> {
    async fn assign_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), RoleMutationError> {
        self.http
            .add_member_role(self.guild_id, user_id, role_id, Some(reason))
            .await?;

        debug!("Gave role {} to user {} in guild {}", role_id, user_id, self.guild_id);
        Ok(())
    }

    async fn replace_roles(
        &self,
        user_id: UserId,
        role_ids: Vec<RoleId>,
        reason: &str,
    ) -> Result<(), RoleMutationError> {
        let edit = EditMember::new().roles(role_ids).audit_log_reason(reason);
        self.guild_id.edit_member(self.http, user_id, edit).await?;

        debug!("Replaced roles of user {} in guild {}", user_id, self.guild_id);
        Ok(())
    }
}

/// Fallback channel and mute role looked up in the gateway cache
pub struct CacheDefaults<'a> {
    cache: &'a Cache,
}

impl<'a> CacheDefaults<'a> {
    pub fn new(cache: &'a Cache) -> Self {
        Self { cache }
    }
}

impl GuildDefaults for CacheDefaults<'_> {
    fn default_channel(&self, guild_id: GuildId) -> Option<ChannelId> {
        self.cache
            .guild(guild_id)
            .and_then(|guild| guild.system_channel_id)
    }

    fn default_mute_role(&self, guild_id: GuildId) -> Option<RoleId> {
        let guild = self.cache.guild(guild_id)?;
        find_role_named(
            guild.roles.values().map(|role| (role.id, role.name.as_str())),
            DEFAULT_MUTE_ROLE_NAME,
        )
    }
}

/// Lowest-id role whose name matches `name`, ignoring case.
///
/// Guild roles come out of a hash map, so iteration order can't pick the winner.
pub fn find_role_named<'a>(
    roles: impl IntoIterator<Item = (RoleId, &'a str)>,
    name: &str,
) -> Option<RoleId> {
    roles
        .into_iter()
        .filter(|(_, role_name)| role_name.eq_ignore_ascii_case(name))
        .map(|(id, _)| id)
        .min()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_role_named_ignores_case() {
        let roles = [
            (RoleId::new(1), "Europe"),
            (RoleId::new(2), "ANTARCTICA"),
            (RoleId::new(3), "antarctica"),
        ];
        assert_eq!(find_role_named(roles, "antarctica"), Some(RoleId::new(2)));
    }

    #[test]
    fn test_find_role_named_ignores_listing_order() {
        let roles = [
            (RoleId::new(9), "Muted"),
            (RoleId::new(4), "MUTED"),
            (RoleId::new(6), "muted"),
        ];
        let mut reversed = roles;
        reversed.reverse();

        assert_eq!(find_role_named(roles, "muted"), Some(RoleId::new(4)));
        assert_eq!(find_role_named(reversed, "muted"), Some(RoleId::new(4)));
    }

    #[test]
    fn test_find_role_named_missing() {
        let roles = [(RoleId::new(1), "Europe")];
        assert_eq!(find_role_named(roles, "antarctica"), None);
    }
}
