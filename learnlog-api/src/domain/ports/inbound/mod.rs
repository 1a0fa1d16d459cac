mod logs;
mod social;
mod streak;

pub use logs::*;
pub use social::*;
pub use streak::*;
