use serenity::all::{ChannelId, RoleId, UserId};

/// Format a user mention
pub fn mention_user(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: ChannelId) -> String {
    format!("<#{}>", channel_id)
}

/// Format a role mention
pub fn mention_role(role_id: RoleId) -> String {
    format!("<@&{}>", role_id)
}

/// "No one", "<@1>", "<@1> and <@2>", "<@1>, <@2> and <@3>"
pub fn mentions_list(user_ids: &[UserId]) -> String {
    let mentions: Vec<String> = user_ids.iter().map(|id| mention_user(*id)).collect();

    match mentions.as_slice() {
        [] => "No one".to_string(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// User ids mentioned as `<@id>` or `<@!id>`, first occurrence order, no repeats
pub fn parse_user_mentions(text: &str) -> Vec<UserId> {
    let mut found = Vec::new();

    for (start, _) in text.match_indices("<@") {
        let rest = &text[start + 2..];
        let rest = rest.strip_prefix('!').unwrap_or(rest);
        let Some(end) = rest.find('>') else {
            continue;
        };

        let Ok(raw) = rest[..end].parse::<u64>() else {
            continue;
        };

        if raw != 0 {
            let user_id = UserId::new(raw);
            if !found.contains(&user_id) {
                found.push(user_id);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<UserId> {
        raw.iter().map(|&id| UserId::new(id)).collect()
    }

    #[test]
    fn test_mentions_list() {
        assert_eq!(mentions_list(&[]), "No one");
        assert_eq!(mentions_list(&ids(&[1])), "<@1>");
        assert_eq!(mentions_list(&ids(&[1, 2])), "<@1> and <@2>");
        assert_eq!(mentions_list(&ids(&[1, 2, 3])), "<@1>, <@2> and <@3>");
    }

    #[test]
    fn test_parse_user_mentions() {
        assert_eq!(
            parse_user_mentions("blacklist <@12> <@!34> and <@12> again"),
            ids(&[12, 34])
        );
    }

    #[test]
    fn test_parse_ignores_roles_channels_and_junk() {
        assert!(parse_user_mentions("<@&5> <#6> <@abc> <@0> <@7").is_empty());
    }
}
