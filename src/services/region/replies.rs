//! Chat replies for the `region` command.

use crate::bot::error::RoleMutationError;
use crate::constants::regions::{ANTARCTICA, REGIONS};
use crate::constants::timeouts::MuteTier;
use crate::services::moderation::{BatchOutcome, BatchShape, Rejection};
use crate::utils::formatting::mentions_list;

pub fn antarctica_banished(mention: &str, tier: MuteTier, spelling: &str) -> String {
    match tier {
        MuteTier::AntarcticaMisspelled => format!(
            "{} is a filthy smud claiming to live in '{}'! They couldn't even spell it right \
             and because of that they'll be stuck there for about {} minutes!",
            mention,
            spelling,
            tier.shouted()
        ),
        _ => format!(
            "{} is a filthy smud claiming to live in Antarctica, their wish has been granted \
             and they will be stuck there for about {} minutes!",
            mention,
            tier.shouted()
        ),
    }
}

pub fn antarctica_failed(mention: &str, rejection: &Rejection) -> String {
    format!(
        "{} is a filthy smud claiming to live in Antarctica, but I couldn't banish them there due to:\n{}",
        mention,
        rejection.reason()
    )
}

pub fn tampering_punished(mention: &str) -> String {
    format!(
        "{} Smuds like you are not allowed to neither remove nor add entries to the blacklist. \
         This misdemeanor has earned you about {} minutes in Antarctica!",
        mention,
        MuteTier::BlacklistTampering.shouted()
    )
}

pub fn tampering_failed(mention: &str, rejection: &Rejection) -> String {
    format!(
        "{} Smuds like you are not allowed to neither remove nor add entries to the blacklist.\n\n\
         Normally this would earn you {} minutes in Antarctica, but I failed to banish you due to:\n{}",
        mention,
        MuteTier::BlacklistTampering.shouted(),
        rejection.reason()
    )
}

pub fn mixed_messages(mention: &str) -> String {
    format!(
        "{} I'm getting mixed messages, I'm not sure if you want to remove or add entries to the blacklist.",
        mention
    )
}

pub fn no_targets(mention: &str) -> String {
    format!(
        "{} You want to edit the blacklist, but you failed to mention anyone. \
         You're a huge disappointment to modkind, please never talk to me again.",
        mention
    )
}

/// Reply for a blacklist edit, worded by the shape of the batch
pub fn blacklist_batch(mention: &str, add: bool, batch: &BatchOutcome) -> String {
    let succeeded = mentions_list(&batch.succeeded());
    let failed = mentions_list(&batch.failed());

    match (add, batch.shape()) {
        (_, None) => no_targets(mention),

        (true, Some(BatchShape::SingleSuccess)) => format!(
            "{} The filthy region abusing smud {} has been banned from changing their region.",
            mention, succeeded
        ),
        (true, Some(BatchShape::SingleFailure)) => format!(
            "{} I wasn't able to add {} to the list of smuds banned from changing their region. \
             Perhaps they're already on the list?",
            mention, failed
        ),
        (true, Some(BatchShape::AllSucceeded)) => format!(
            "{} The filthy region abusing smuds {} have been banned from changing their region.",
            mention, succeeded
        ),
        (true, Some(BatchShape::PartialFailure)) => format!(
            "{} I wasn't able to add all of the requested users to the list of smuddy region abusers, \
             perhaps some of them were already there?\nBlacklisted: {}\nNot blacklisted: {}",
            mention, succeeded, failed
        ),

        (false, Some(BatchShape::SingleSuccess)) => format!(
            "{} The user {} is once again allowed to change their region.",
            mention, succeeded
        ),
        (false, Some(BatchShape::SingleFailure)) => format!(
            "{} I wasn't able to remove {} from the list of smuds banned from changing their region. \
             Perhaps they're already off the list?",
            mention, failed
        ),
        (false, Some(BatchShape::AllSucceeded)) => format!(
            "{} The users {} are once again allowed to change their regions.",
            mention, succeeded
        ),
        (false, Some(BatchShape::PartialFailure)) => format!(
            "{} I wasn't able to remove all of the requested users from the list of smuddy region abusers, \
             perhaps some of them were already removed?\nUnblacklisted: {}\nNot unblacklisted: {}",
            mention, succeeded, failed
        ),
    }
}

pub fn blocked(mention: &str) -> String {
    format!(
        "{} Smuds like you are why we can't have nice things, or rather... why you can't have nice things. \
         The *privilege* of changing your own region has been revoked from you.",
        mention
    )
}

pub fn region_list(mention: &str) -> String {
    let mut names: Vec<&str> = REGIONS.iter().map(|(name, _)| *name).collect();
    names.insert(3, ANTARCTICA);

    let lines: Vec<String> = names.iter().map(|name| format!("- {}", name)).collect();
    format!("{} The available regions are:\n{}", mention, lines.join("\n"))
}

pub fn no_match(mention: &str, prefix: &str) -> String {
    format!(
        "{} I couldn't find any match for the region you mentioned. \
         Type {}region list for a list of available regions.",
        mention, prefix
    )
}

pub fn already_in(mention: &str, region: &str) -> String {
    format!("{} You're already in {}, wtf are you trying to do?", mention, region)
}

pub fn missing_region_role(mention: &str, region: &str) -> String {
    format!(
        "{} I found a match for you, but this server has no role called {}. :thinking:",
        mention, region
    )
}

pub fn assigned(mention: &str, region: &str) -> String {
    format!(
        "{} You've successfully been assigned a new region!\nWelcome to **{}**!",
        mention, region
    )
}

pub fn assignment_failed(mention: &str, error: &RoleMutationError) -> String {
    match error {
        RoleMutationError::Forbidden => format!(
            "{} I found a match for you, but I wasn't allowed to edit your roles due to insufficient privileges. :sob:",
            mention
        ),
        RoleMutationError::Network(_) => format!(
            "{} I found a match for you, but due to a connection error I wasn't able to edit your roles. :sob:",
            mention
        ),
    }
}
