use std::fmt;
use std::str::FromStr;
use std::slice::Iter;

use super::{Version, Header, write_headers};
use super::error::*;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType{ GET, HEAD, PUT, POST, DELETE, OPTIONS }
impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::GET => write!(f, "GET"),
            Self::HEAD => write!(f, "HEAD"),
            Self::PUT => write!(f, "PUT"),
            Self::POST => write!(f, "POST"),
            Self::DELETE => write!(f, "DELETE"),
            Self::OPTIONS => write!(f, "OPTIONS"),
        }
    }
}
impl FromStr for RequestType{
    type Err = Error;
    #[inline]
    fn from_str(s: &str) -> Result<RequestType> {
        match s {
            "GET" => Ok(RequestType::GET),
            "HEAD" => Ok(RequestType::HEAD),
            "PUT" => Ok(RequestType::PUT),
            "POST" => Ok(RequestType::POST),
            "DELETE" => Ok(RequestType::DELETE),
            "OPTIONS" => Ok(RequestType::OPTIONS),
            _ => Err(Error::format_error(format!("Unknown request type '{s}'")))
        }
    }
}


#[derive(Debug, Clone)]
pub struct Request {
    pub request_type: RequestType,
    pub path: String,
    pub version: Version,
    pub headers: Vec<Header>,
}
impl Request {
    pub fn headers(&self) -> Iter<Header> {
        self.headers.iter()
    }

    /// Request target without query string or fragment.
    pub fn route(&self) -> &str {
        let end = self.path.find(['?', '#']).unwrap_or(self.path.len());
        &self.path[..end]
    }

    pub fn content_length(&self) -> usize {
        self.headers().find_map(|h| match h {
            Header::ContentLength(len) => Some(*len),
            _ => None,
        }).unwrap_or(0)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.request_type, self.path, self.version)?;
        write_headers(f, &self.headers)?;
        write!(f, "\r\n")
    }
}

impl FromStr for Request{
    type Err = Error;
    #[inline]
    fn from_str(s: &str) -> Result<Request> {
        let mut lines = s.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let mut words = request_line.split(' ');
        let (Some(request_type), Some(path), Some(version), None) =
            (words.next(), words.next(), words.next(), words.next()) else {
            return Err(Error::format_error(format!("Malformed request line '{request_line}'")));
        };
        let headers = lines
            .filter(|line| !line.is_empty())
            .map(|line| line.parse::<Header>())
            .collect::<Result<Vec<Header>>>()?;
        Ok(Request {
            request_type: request_type.parse()?,
            path: path.to_string(),
            version: version.parse()?,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_line_and_headers() {
        let req: Request = "GET /index.html?v=2 HTTP/1.1\r\nHost: 127.0.0.1:8080\r\nAccept: */*"
            .parse()
            .unwrap();
        assert_eq!(req.request_type, RequestType::GET);
        assert_eq!(req.path, "/index.html?v=2");
        assert_eq!(req.route(), "/index.html");
        assert_eq!(req.version, Version::V1_1);
        assert_eq!(req.headers, vec![Header::host("127.0.0.1:8080"), Header::Unsupported]);
    }

    #[test]
    fn rejects_malformed_request_line() {
        assert!("GET /".parse::<Request>().is_err());
        assert!("FETCH / HTTP/1.1".parse::<Request>().is_err());
        assert!("GET / HTTP/2".parse::<Request>().is_err());
        assert!("GET / HTTP/1.1 extra".parse::<Request>().is_err());
    }

    #[test]
    fn display_round_trips_request_line() {
        let req: Request = "HEAD / HTTP/1.0\r\nConnection: close".parse().unwrap();
        assert_eq!(req.to_string(), "HEAD / HTTP/1.0\r\nConnection: close\r\n\r\n");
    }
}
