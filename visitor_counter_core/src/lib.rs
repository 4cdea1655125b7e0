mod config;
mod document;
mod error;
mod fetcher;
mod source;
#[cfg(test)]
mod test_log;

pub use self::config::*;
pub use self::document::*;
pub use self::error::*;
pub use self::fetcher::*;
pub use self::source::*;
