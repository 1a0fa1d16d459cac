mod error;
pub mod import;
pub mod models;
pub mod ports;
pub mod services;
pub mod streak;

pub use error::*;
