mod activity;
mod auth;
mod ids;
mod import;
mod log_entry;
mod notification;
mod social;
mod streak;

pub use activity::*;
pub use auth::*;
pub use ids::*;
pub use import::*;
pub use log_entry::*;
pub use notification::*;
pub use social::*;
pub use streak::*;
