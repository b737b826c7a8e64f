//! Configuration domain module

mod app_config;
mod duration;

pub use app_config::AppConfig;
pub use duration::{Duration, DEFAULT_TIMEOUT_SECS};
