pub mod admin;
pub mod chat;
pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;

pub use error::AppError;
