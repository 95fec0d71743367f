use chrono::{DateTime, Duration, Utc};

/// Role handed out as punishment when a guild has not configured one
pub const DEFAULT_MUTE_ROLE_NAME: &str = "antarctica";

/// Preset punitive mute lengths, one per kind of offense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteTier {
    /// Claimed to live in Antarctica and spelled it right
    AntarcticaSpelledRight,
    /// Claimed to live in Antarctica and could not even spell it
    AntarcticaMisspelled,
    /// Non-moderator tried to edit the region blacklist
    BlacklistTampering,
}

impl MuteTier {
    pub fn minutes(self) -> i64 {
        match self {
            MuteTier::AntarcticaSpelledRight => 10,
            MuteTier::AntarcticaMisspelled => 20,
            MuteTier::BlacklistTampering => 15,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(self.minutes())
    }

    pub fn until(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.duration()
    }

    /// Shouted form used in replies
    pub fn shouted(self) -> &'static str {
        match self {
            MuteTier::AntarcticaSpelledRight => "TEN",
            MuteTier::AntarcticaMisspelled => "TWENTY",
            MuteTier::BlacklistTampering => "FIFTEEN",
        }
    }
}
