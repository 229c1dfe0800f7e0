mod app_config;
pub use self::app_config::*;

pub mod services;
