use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode (pub u16);
impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);

    pub fn name(&self) -> &'static str {
        match self {
            StatusCode(200..=299) => "OK",
            StatusCode(400) => "Bad Request",
            StatusCode(404) => "Not Found",
            StatusCode(405) => "Method Not Allowed",
            _ => "",
        }
    }
}
impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
