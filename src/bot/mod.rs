pub mod checks;
pub mod data;
pub mod error;
pub mod error_handler;
pub mod framework;
