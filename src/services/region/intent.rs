//! Turns the freeform text of `region` into one action.

use serenity::all::UserId;

use crate::constants::regions::{
    ANTARCTICA_SPELLINGS, BLACKLIST_ADD_WORDS, BLACKLIST_REMOVE_WORDS,
    CORRECT_ANTARCTICA_SPELLINGS, LIST_WORDS, REGIONS,
};
use crate::constants::timeouts::MuteTier;
use crate::utils::formatting::parse_user_mentions;

/// Everything the text asked for, before precedence is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRequest {
    pub antarctica: bool,
    /// The misspelling used, if Antarctica was misspelled
    pub misspelling: Option<&'static str>,
    pub add_blacklist: bool,
    pub remove_blacklist: bool,
    pub list: bool,
    pub region: Option<&'static str>,
    pub mentions: Vec<UserId>,
}

/// The single thing `region` will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionAction {
    Antarctica { tier: MuteTier, spelling: String },
    PunishBlacklistTampering,
    MixedBlacklistMessages,
    NoBlacklistTargets,
    EditBlacklist { add: bool, targets: Vec<UserId> },
    Blocked,
    List,
    Assign(&'static str),
    NoMatch,
}

impl RegionRequest {
    pub fn parse(text: &str) -> Self {
        let padded = format!(" {} ", text.to_lowercase());
        let starts_word = |word: &str| padded.contains(&format!(" {}", word));
        let whole_word = |word: &str| padded.contains(&format!(" {} ", word));

        let mut request = RegionRequest {
            add_blacklist: BLACKLIST_ADD_WORDS.iter().any(|w| starts_word(w)),
            remove_blacklist: BLACKLIST_REMOVE_WORDS.iter().any(|w| starts_word(w)),
            list: LIST_WORDS.iter().any(|w| starts_word(w)),
            mentions: parse_user_mentions(text),
            ..Default::default()
        };

        for (i, spelling) in ANTARCTICA_SPELLINGS.iter().enumerate() {
            if whole_word(spelling) {
                request.antarctica = true;
                if i >= CORRECT_ANTARCTICA_SPELLINGS {
                    request.misspelling = Some(spelling);
                }
            }
        }

        // Later entries in the table win when several regions match
        for (region, aliases) in REGIONS {
            if aliases.iter().any(|alias| whole_word(alias)) {
                request.region = Some(region);
            }
        }

        request
    }

    /// Apply precedence: antarctica, blacklist edits, blacklisted block,
    /// list, then assignment.
    pub fn decide(&self, is_mod: bool, is_blacklisted: bool) -> RegionAction {
        if self.antarctica {
            return match self.misspelling {
                Some(spelling) => RegionAction::Antarctica {
                    tier: MuteTier::AntarcticaMisspelled,
                    spelling: spelling.to_string(),
                },
                None => RegionAction::Antarctica {
                    tier: MuteTier::AntarcticaSpelledRight,
                    spelling: "antarctic(a)".to_string(),
                },
            };
        }

        if self.add_blacklist || self.remove_blacklist {
            return if !is_mod {
                RegionAction::PunishBlacklistTampering
            } else if self.add_blacklist && self.remove_blacklist {
                RegionAction::MixedBlacklistMessages
            } else if self.mentions.is_empty() {
                RegionAction::NoBlacklistTargets
            } else {
                RegionAction::EditBlacklist {
                    add: self.add_blacklist,
                    targets: self.mentions.clone(),
                }
            };
        }

        if is_blacklisted && !is_mod {
            return RegionAction::Blocked;
        }

        if self.list {
            return RegionAction::List;
        }

        match self.region {
            Some(region) => RegionAction::Assign(region),
            None => RegionAction::NoMatch,
        }
    }
}
