pub mod handler;
pub mod intent;
pub mod replies;

pub use handler::{handle_region, RegionInvocation};
pub use intent::{RegionAction, RegionRequest};
