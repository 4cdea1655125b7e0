mod error;
mod header;
mod helpers;
mod request;
mod response;
mod server;
mod status_code;
mod version;

pub use self::error::*;
pub use self::header::*;
pub use self::helpers::*;
pub use self::request::*;
pub use self::response::*;
pub use self::server::*;
pub use self::status_code::*;
pub use self::version::*;
