use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::str::from_utf8;
use std::sync::Arc;

use super::error::*;
use super::{Request, Response, Header, Version, StatusCode};

// Request line plus headers. Browsers stay far below this.
const MAX_HEAD_SIZE: usize = 8 * 1024;


pub fn make_http_response(status_code: StatusCode, headers: Vec<Header>, body: Option<Arc<[u8]>>) -> Response {
    Response {
        version: Version::V1_1,
        status_code,
        headers,
        body,
    }
}

/// Reads one request head from the stream. Request bodies are read and
/// dropped, nothing served here needs them.
pub fn parse_request<T: Read>(reader: &mut BufReader<T>) -> Result<Request>{
    let mut head = Vec::new();
    loop {
        let limit = (MAX_HEAD_SIZE + 1 - head.len()) as u64;
        let read = reader.by_ref().take(limit).read_until(b'\n', &mut head)?;
        if head.len() > MAX_HEAD_SIZE {
            return Err(Error::format_error(format!("Request head exceeds {MAX_HEAD_SIZE} bytes")));
        }
        if read == 0 {
            return Err(if head.is_empty() { Error::Closed } else { Error::Incomplete });
        }
        if head.ends_with(b"\r\n\r\n") { break };
    }
    let msg = from_utf8(&head[..head.len() - 4])?;
    let request: Request = msg.parse()?;
    let mut body = reader.by_ref().take(request.content_length() as u64);
    std::io::copy(&mut body, &mut std::io::sink())?;
    Ok(request)
}

pub fn write_response<T: Write>(writer: &mut BufWriter<T>, response: &Response) -> Result<()> {
    writer.write_all(response.to_string().as_bytes())?;
    if let Some(body) = &response.body {
        writer.write_all(body)?;
    }
    writer.flush()?;
    Ok(())
}
