mod comment;
mod follow;
mod log;
mod profile;
mod reaction;

pub use comment::*;
pub use follow::*;
pub use log::*;
pub use profile::*;
pub use reaction::*;

/// Table names exposed through the REST interface.
pub mod tables {
    pub const LOGS: &str = "logs";
    pub const FOLLOWS: &str = "follows";
    pub const REACTIONS: &str = "reactions";
    pub const COMMENTS: &str = "comments";
    pub const PROFILES: &str = "profiles";
}
