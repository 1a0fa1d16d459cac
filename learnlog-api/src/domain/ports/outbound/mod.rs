mod activity_reader;
mod clock;
mod identity;
mod log_store;
mod social_store;

pub use activity_reader::*;
pub use clock::*;
pub use identity::*;
pub use log_store::*;
pub use social_store::*;

#[cfg(test)]
pub mod mock;
