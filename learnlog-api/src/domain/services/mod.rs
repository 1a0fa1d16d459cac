mod logs;
mod social;
mod streak;

pub use logs::LogServiceImpl;
pub use social::SocialServiceImpl;
pub use streak::StreakServiceImpl;
