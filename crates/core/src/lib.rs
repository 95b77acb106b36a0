pub mod config;
pub mod error;
pub mod layout;
pub mod logger;
pub mod monitor;
pub mod orchestrator;
pub mod platform;
pub mod script;
pub mod settings;
pub mod types;
pub mod window;
