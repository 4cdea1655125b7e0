use std::fmt;
use std::sync::Arc;

use super::{Version, StatusCode, Header, write_headers};


pub struct Response {
    pub version: Version,
    pub status_code: StatusCode,
    pub headers: Vec<Header>,
    pub body: Option<Arc<[u8]>>,
}
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.version, self.status_code, self.status_code.name())?;
        write_headers(f, &self.headers)?;
        write!(f, "\r\n")
    }
}
