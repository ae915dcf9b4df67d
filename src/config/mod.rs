mod app_config;
mod s3_config;

pub use app_config::{AppConfig, DatabaseConfig, ServerConfig, StorageConfig};
pub use s3_config::*;
