pub mod api;
pub mod client;
pub mod config;
pub mod store;

pub use self::config::Config;
