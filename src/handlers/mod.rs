pub mod event_handler;
