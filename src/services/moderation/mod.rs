pub mod blacklist_ledger;
pub mod coordinator;
pub mod mute_ledger;
pub mod outcome;

pub use blacklist_ledger::{BlacklistFix, BlacklistLedger};
pub use coordinator::ModerationCoordinator;
pub use mute_ledger::{MuteFix, MuteLedger};
pub use outcome::{BatchOutcome, BatchShape, Rejection, TargetOutcome};
