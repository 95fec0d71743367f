pub mod freezemute;
pub mod region;
pub mod settings;
