pub mod errors;
pub mod moderation;
pub mod region;
pub mod roles;
pub mod settings;
pub mod store;
