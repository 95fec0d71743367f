use chrono::{DateTime, Utc};
use serenity::all::UserId;

/// Latest mute imposed on a user. Kept after expiry as mute history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteRecord {
    pub user_id: UserId,
    pub until: DateTime<Utc>,
    /// The user asked for this mute themselves
    pub voluntary: bool,
}

impl MuteRecord {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.until
    }
}
