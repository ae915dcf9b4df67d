pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

pub use app::AppState;
pub use config::AppConfig;
pub use error::{AppError, Result};
