pub mod embeds;
pub mod regions;
pub mod timeouts;
