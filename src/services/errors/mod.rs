pub mod classifier;
pub mod failure;
pub mod wording;

pub use classifier::{classify, Classification, Severity};
pub use failure::{BucketScope, CommandFailure, Invocation};
