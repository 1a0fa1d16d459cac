pub(crate) mod error;
pub(crate) mod following;
pub(crate) mod import;
pub(crate) mod logs;
pub(crate) mod notifications;
pub(crate) mod profiles;
pub(crate) mod streak;
pub(crate) mod users;

pub(crate) use error::ApiError;
