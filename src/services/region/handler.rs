use serenity::all::{GuildId, RoleId, UserId};
use tracing::{info, warn};

use crate::constants::regions::REGIONS;
use crate::constants::timeouts::MuteTier;
use crate::services::moderation::ModerationCoordinator;
use crate::services::region::intent::{RegionAction, RegionRequest};
use crate::services::region::replies;
use crate::services::roles::{find_role_named, RoleMutator};
use crate::services::settings::GuildDefaults;
use crate::services::store::SettingsStore;
use crate::utils::formatting::mention_user;

/// Everything about the invoker the command gathered from the cache
pub struct RegionInvocation<'a> {
    pub guild_id: GuildId,
    pub author_id: UserId,
    pub author_roles: &'a [RoleId],
    pub guild_roles: &'a [(RoleId, String)],
    pub is_mod: bool,
    pub prefix: &'a str,
}

impl RegionInvocation<'_> {
    fn role_named(&self, name: &str) -> Option<RoleId> {
        find_role_named(
            self.guild_roles.iter().map(|(id, role_name)| (*id, role_name.as_str())),
            name,
        )
    }
}

/// Run one `region` request and return the single reply to send
pub async fn handle_region<R, D>(
    store: &SettingsStore,
    roles: &R,
    defaults: &D,
    invocation: &RegionInvocation<'_>,
    text: &str,
) -> String
where
    R: RoleMutator,
    D: GuildDefaults,
{
    let mention = mention_user(invocation.author_id);
    let request = RegionRequest::parse(text);
    let is_blacklisted =
        !invocation.is_mod && store.blacklist.is_blacklisted(invocation.author_id);
    let coordinator = ModerationCoordinator::new(store);

    match request.decide(invocation.is_mod, is_blacklisted) {
        RegionAction::Antarctica { tier, spelling } => {
            let reason = format!("User issued {}region {}", invocation.prefix, spelling);
            let outcome = coordinator
                .impose_mute(
                    roles,
                    defaults,
                    invocation.guild_id,
                    invocation.author_id,
                    tier,
                    &reason,
                )
                .await;

            match outcome.result {
                Ok(()) => replies::antarctica_banished(&mention, tier, &spelling),
                Err(rejection) => replies::antarctica_failed(&mention, &rejection),
            }
        }

        RegionAction::PunishBlacklistTampering => {
            let outcome = coordinator
                .impose_mute(
                    roles,
                    defaults,
                    invocation.guild_id,
                    invocation.author_id,
                    MuteTier::BlacklistTampering,
                    "User tried to edit the region blacklist",
                )
                .await;

            match outcome.result {
                Ok(()) => replies::tampering_punished(&mention),
                Err(rejection) => replies::tampering_failed(&mention, &rejection),
            }
        }

        RegionAction::MixedBlacklistMessages => replies::mixed_messages(&mention),

        RegionAction::NoBlacklistTargets => replies::no_targets(&mention),

        RegionAction::EditBlacklist { add, targets } => {
            let batch = coordinator.fix_blacklist(&targets, add).await;
            replies::blacklist_batch(&mention, add, &batch)
        }

        RegionAction::Blocked => replies::blocked(&mention),

        RegionAction::List => replies::region_list(&mention),

        RegionAction::NoMatch => replies::no_match(&mention, invocation.prefix),

        RegionAction::Assign(region) => assign_region(roles, invocation, region, &mention).await,
    }
}

/// Swap whatever region role the author has for `region`
async fn assign_region<R: RoleMutator>(
    roles: &R,
    invocation: &RegionInvocation<'_>,
    region: &str,
    mention: &str,
) -> String {
    let Some(target) = invocation.role_named(region) else {
        warn!("Guild {} has no role named {}", invocation.guild_id, region);
        return replies::missing_region_role(mention, region);
    };

    if invocation.author_roles.contains(&target) {
        return replies::already_in(mention, region);
    }

    let region_roles: Vec<RoleId> = REGIONS
        .iter()
        .filter_map(|(name, _)| invocation.role_named(name))
        .collect();

    let mut new_roles: Vec<RoleId> = invocation
        .author_roles
        .iter()
        .copied()
        .filter(|role| !region_roles.contains(role))
        .collect();
    new_roles.push(target);

    let reason = format!("User picked region {}", region);
    match roles
        .replace_roles(invocation.author_id, new_roles, &reason)
        .await
    {
        Ok(()) => {
            info!("User {} moved to region {}", invocation.author_id, region);
            replies::assigned(mention, region)
        }
        Err(e) => {
            warn!(
                "Failed to move user {} to region {}: {:?}",
                invocation.author_id, region, e
            );
            replies::assignment_failed(mention, &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::error::RoleMutationError;
    use crate::db::pool::memory_pool;
    use crate::services::roles::fakes::{FixedDefaults, RecordingRoles};

    const GUILD: GuildId = GuildId::new(1);
    const AUTHOR: UserId = UserId::new(42);

    fn guild_roles() -> Vec<(RoleId, String)> {
        vec![
            (RoleId::new(10), "Europe".to_string()),
            (RoleId::new(11), "Asia".to_string()),
            (RoleId::new(12), "North America".to_string()),
            (RoleId::new(200), "Antarctica".to_string()),
            (RoleId::new(300), "Regular".to_string()),
        ]
    }

    async fn store() -> SettingsStore {
        SettingsStore::open(memory_pool().await).await.unwrap()
    }

    async fn run(
        store: &SettingsStore,
        roles: &RecordingRoles,
        author_roles: &[RoleId],
        is_mod: bool,
        text: &str,
    ) -> String {
        let guild_roles = guild_roles();
        let invocation = RegionInvocation {
            guild_id: GUILD,
            author_id: AUTHOR,
            author_roles,
            guild_roles: &guild_roles,
            is_mod,
            prefix: "!",
        };
        handle_region(store, roles, &FixedDefaults::default(), &invocation, text).await
    }

    #[tokio::test]
    async fn test_antarctica_mutes_author() {
        let store = store().await;
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[], false, "antarctica").await;

        assert!(reply.contains("about TEN minutes"));
        assert!(store.mutes.is_muted(AUTHOR));
        assert_eq!(
            roles.assigned(),
            vec![(AUTHOR, RoleId::new(200), "User issued !region antarctic(a)".to_string())]
        );
    }

    #[tokio::test]
    async fn test_antarctica_role_failure_still_records_mute() {
        let store = store().await;
        let roles = RecordingRoles::failing_for(AUTHOR, RoleMutationError::Forbidden);

        let reply = run(&store, &roles, &[], false, "antartic").await;

        assert!(reply.ends_with("due to:\nLacking permissions to change role."));
        assert!(store.mutes.is_muted(AUTHOR));
    }

    #[tokio::test]
    async fn test_non_mod_tampering_is_punished() {
        let store = store().await;
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[], false, "blacklist <@7>").await;

        assert!(reply.contains("FIFTEEN minutes in Antarctica"));
        assert!(!store.blacklist.is_blacklisted(UserId::new(7)));
        assert!(store.mutes.is_muted(AUTHOR));
    }

    #[tokio::test]
    async fn test_mod_blacklists_three_users_one_already_listed() {
        let store = store().await;
        store.blacklist.fix_blacklist(UserId::new(2), true).await.unwrap();
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[], true, "blacklist <@1> <@2> <@3>").await;

        assert!(reply.ends_with("\nBlacklisted: <@1> and <@3>\nNot blacklisted: <@2>"));
        for id in [1, 2, 3] {
            assert!(store.blacklist.is_blacklisted(UserId::new(id)));
        }
    }

    #[tokio::test]
    async fn test_blacklisted_author_is_blocked() {
        let store = store().await;
        store.blacklist.fix_blacklist(AUTHOR, true).await.unwrap();
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[], false, "europe").await;

        assert!(reply.contains("has been revoked from you"));
        assert!(roles.replaced().is_empty());
    }

    #[tokio::test]
    async fn test_assignment_replaces_old_region() {
        let store = store().await;
        let roles = RecordingRoles::default();
        let author_roles = [RoleId::new(11), RoleId::new(300), RoleId::new(200)];

        let reply = run(&store, &roles, &author_roles, false, "germany").await;

        assert!(reply.contains("Welcome to **Europe**!"));
        assert_eq!(
            roles.replaced(),
            vec![(AUTHOR, vec![RoleId::new(300), RoleId::new(200), RoleId::new(10)])]
        );
    }

    #[tokio::test]
    async fn test_assignment_to_current_region() {
        let store = store().await;
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[RoleId::new(10)], false, "france").await;

        assert!(reply.contains("already in Europe"));
        assert!(roles.replaced().is_empty());
    }

    #[tokio::test]
    async fn test_assignment_connection_error() {
        let store = store().await;
        let roles = RecordingRoles::failing_for(AUTHOR, RoleMutationError::Network("reset".into()));

        let reply = run(&store, &roles, &[], false, "japan").await;

        assert!(reply.contains("due to a connection error"));
    }

    #[tokio::test]
    async fn test_region_without_role() {
        let store = store().await;
        let roles = RecordingRoles::default();

        let reply = run(&store, &roles, &[], false, "australia").await;

        assert!(reply.contains("no role called Oceania"));
    }

    #[tokio::test]
    async fn test_list_and_no_match() {
        let store = store().await;
        let roles = RecordingRoles::default();

        assert!(run(&store, &roles, &[], false, "list").await.contains("The available regions are:"));
        assert!(run(&store, &roles, &[], false, "narnia").await.contains("Type !region list"));
    }
}
