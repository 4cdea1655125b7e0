use std::fmt;
use std::str::FromStr;

use super::error::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Header{
    Host(String),
    Connection(String),
    Allow(String),
    CacheControl(String),
    ContentLength(usize),
    ContentType(String),
    Unsupported,
}
impl Header{
    pub fn host (s: &str) -> Header { Header::Host(s.into()) }
    pub fn connection (s: &str) -> Header { Header::Connection(s.into()) }
    pub fn allow (s: &str) -> Header { Header::Allow(s.into()) }
    pub fn cache_control (s: &str) -> Header { Header::CacheControl(s.into()) }
    pub fn content_length (s: &str) -> Result<Header> { Ok(Header::ContentLength(s.parse()?))}
    pub fn content_type (s: &str) -> Header { Header::ContentType(s.into())}

    /// Mime type served for a path, judged by its extension.
    pub fn content_type_for(path: &str) -> Option<Header> {
        let mime_type = match path.rsplit_once('.').map(|(_, ext)| ext) {
            Some("wasm") => "application/wasm",
            Some("html") => "text/html; charset=utf-8",
            Some("js")   => "application/javascript",
            Some("css")  => "text/css",
            Some("txt")  => "text/plain; charset=utf-8",
            _            => return None,
        };
        Some(Header::content_type(mime_type))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Header::Host(s) => write!(f, "Host: {}", s),
            Header::Connection(s) => write!(f, "Connection: {}", s),
            Header::Allow(s) => write!(f, "Allow: {}", s),
            Header::CacheControl(s) => write!(f, "Cache-Control: {}", s),
            Header::ContentLength(s) => write!(f, "Content-Length: {}", s),
            Header::ContentType(s) => write!(f, "Content-Type: {}", s),
            Header::Unsupported => write!(f, "Unsupported Header"),
        }
    }
}

impl FromStr for Header{
    type Err = Error;
    #[inline]
    fn from_str(s: &str) -> Result<Header> {
        let (header, value) = s.split_at(s.find(':')
            .ok_or(Error::format_error(format!("Unable to parse header '{s}'")))?);
        let value = &value[1..].trim();
        match header.to_ascii_lowercase().as_str() {
            "host" => Ok(Header::host(value)),
            "connection" => Ok(Header::connection(value)),
            "allow" => Ok(Header::allow(value)),
            "cache-control" => Ok(Header::cache_control(value)),
            "content-length" => Ok(Header::content_length(value)?),
            "content-type" => Ok(Header::content_type(value)),
            _ => Ok(Header::Unsupported)
        }
    }
}

pub fn write_headers(f: &mut fmt::Formatter, headers: &[Header]) -> fmt::Result {
    headers.iter().try_fold((), |_, header| {
        write!(f, "{}", header)?;
        write!(f, "\r\n")
    })
}
