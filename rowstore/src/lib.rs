mod auth;
mod client;
pub mod domain;
mod query;
mod rowstore_url;

pub(crate) use rowstore_url::*;

pub use auth::*;
pub use client::*;
pub use domain::*;
pub use query::*;
