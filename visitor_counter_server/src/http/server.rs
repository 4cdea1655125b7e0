use std::collections::HashMap;
use std::io::{self, BufReader, BufWriter};
use std::marker::PhantomData;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use log::{debug, info, warn};

use crate::utils::defer;

use super::error::Error;
use super::{Header, Request, RequestType, StatusCode, Version};
use super::helpers::*;

// Guards against redirect cycles such as "/" -> "/" in a misconfigured table.
const MAX_INTERNAL_REDIRECTS: usize = 8;

#[derive(Debug)]
pub struct Endpoint{
    headers: Vec<Header>,
    response_action: Option<ResponseAction>,
}

pub struct EndpointAny {}
pub trait EndpointAnyBuilder {
    fn build(self);
    fn add_response_header(&mut self, header: Header) -> &mut Self;
}

pub struct EndpointWithoutContent {}
pub trait EndpointWithoutContentBuilder<'a> : EndpointAnyBuilder {
    fn internal_redirect(self, path: &'a str) -> EndpointBuilder<'a, EndpointAny>;
    fn set_response_body(self, body: Vec<u8>) -> EndpointBuilder<'a, EndpointAny>;
}

#[derive(Debug)]
pub enum ResponseAction {
    Content(Arc<[u8]>),
    InternalRedirect(String),
}

pub struct EndpointBuilder<'a, T> {
    server_config: &'a mut ServerConfig,
    path: &'a str,
    endpoint: Endpoint,
    _marker: PhantomData<T>
}

impl <'a, T> EndpointAnyBuilder for EndpointBuilder<'a, T> {
    #[inline]
    fn build(self) {
        let mut endpoint = self.endpoint;
        if let Some(ResponseAction::Content(body)) = &endpoint.response_action {
            let size = body.len();
            let has = |f: fn(&Header) -> bool| endpoint.headers.iter().any(f);
            let has_type   = has(|h| matches!(h, Header::ContentType(_)));
            let has_length = has(|h| matches!(h, Header::ContentLength(_)));
            let has_cache  = has(|h| matches!(h, Header::CacheControl(_)));
            if !has_type {
                endpoint.headers.extend(Header::content_type_for(self.path));
            }
            if !has_length {
                endpoint.headers.push(Header::ContentLength(size));
            }
            // Assets change on every rebuild.
            if !has_cache {
                endpoint.headers.push(Header::cache_control("no-cache"));
            }
        }
        self.server_config.endpoints.insert(self.path.to_string(), endpoint);
    }
    #[inline]
    fn add_response_header(&mut self, header: Header) -> &mut Self {
        self.endpoint.headers.push(header);
        self
    }
}

impl <'a> EndpointWithoutContentBuilder<'a> for EndpointBuilder<'a, EndpointWithoutContent> {
    #[inline]
    fn internal_redirect(self, path: &'a str) -> EndpointBuilder<'a, EndpointAny> {
        EndpointBuilder {
            server_config: self.server_config,
            path: self.path,
            endpoint: Endpoint {
                headers: self.endpoint.headers,
                response_action: Some(ResponseAction::InternalRedirect(path.to_string())),
            },
            _marker: Default::default()
        }
    }
    #[inline]
    fn set_response_body(self, body: Vec<u8>) -> EndpointBuilder<'a, EndpointAny> {
        EndpointBuilder {
            server_config: self.server_config,
            path: self.path,
            endpoint: Endpoint {
                headers: self.endpoint.headers,
                response_action: Some(ResponseAction::Content(Arc::from(body))),
            },
            _marker: Default::default()
        }
    }
}

/// Table of paths the server answers, shared with the rebuild thread.
#[derive(Debug, Default)]
pub struct ServerConfig{
    endpoints: HashMap<String, Endpoint>,
}

impl ServerConfig {
    pub fn new() -> ServerConfig {
        ServerConfig::default()
    }

    pub fn on_get_request<'a>(&'a mut self, path: &'a str) -> EndpointBuilder<'a, EndpointWithoutContent> {
        EndpointBuilder {
            server_config: self,
            path,
            endpoint: Endpoint {
                headers: vec![],
                response_action: None
            },
            _marker: Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Follows internal redirects until a path with content is found.
    pub fn resolve(&self, path: &str) -> Option<(&[Header], &Arc<[u8]>)> {
        let mut path = path;
        for _ in 0..=MAX_INTERNAL_REDIRECTS {
            let endpoint = self.endpoints.get(path)?;
            match endpoint.response_action.as_ref()? {
                ResponseAction::Content(body) => return Some((endpoint.headers.as_slice(), body)),
                ResponseAction::InternalRedirect(redirect_path) => { path = redirect_path.as_str(); },
            }
        }
        warn!("Too many internal redirects while resolving '{path}'");
        None
    }
}

pub struct Server {
    listener: TcpListener,
    config: Arc<RwLock<ServerConfig>>,
}

impl Server{
    pub fn new(listener: TcpListener, config: Arc<RwLock<ServerConfig>>) -> Self {
        Server { listener, config }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn listen(&self) -> io::Result<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => { warn!("Unable to accept connection: {err}"); continue },
            };
            let config = self.config.clone();
            // Each connection uses its own thread. Simple but does not scale. Fine for dev server.
            thread::spawn(move || {
                if let Err(err) = handle_connection(stream, config) {
                    debug!("Connection ended with error: {err}");
                }
            });
        }
        Ok(())
    }
}

fn handle_connection(stream: TcpStream, config: Arc<RwLock<ServerConfig>>) -> Result<(), Error> {
    let peer_addr = stream.peer_addr()?;
    debug!("Got connection {peer_addr}");
    defer! { debug!("Closed connection {peer_addr}") };
    let mut reader = BufReader::new(&stream);
    let mut writer = BufWriter::new(&stream);
    loop {
        let req = match parse_request(&mut reader) {
            Ok(req) => req,
            Err(Error::Closed) => return Ok(()),
            Err(err) => return Err(err),
        };
        // The table is only locked while the response is assembled, writing
        // to a slow client must not hold up a rebuild.
        let resp = {
            let table = config.read().unwrap_or_else(PoisonError::into_inner);
            respond(&table, &req)
        };
        write_response(&mut writer, &resp)?;
        info!("{} {} -> {}", req.request_type, req.path, resp.status_code);
        if !keep_alive(&req) { return Ok(()) };
    }
}

fn respond(config: &ServerConfig, req: &Request) -> super::Response {
    let empty = || vec![Header::ContentLength(0)];
    match req.request_type {
        RequestType::GET | RequestType::HEAD => match config.resolve(req.route()) {
            Some((headers, body)) => {
                let body = (req.request_type == RequestType::GET).then(|| body.clone());
                make_http_response(StatusCode::OK, headers.to_vec(), body)
            }
            None => make_http_response(StatusCode::NOT_FOUND, empty(), None),
        },
        _ => {
            let mut headers = empty();
            headers.push(Header::allow("GET, HEAD"));
            make_http_response(StatusCode::METHOD_NOT_ALLOWED, headers, None)
        }
    }
}

fn keep_alive(req: &Request) -> bool {
    let connection = req.headers().find_map(|h| match h {
        Header::Connection(value) => Some(value.to_ascii_lowercase()),
        _ => None,
    });
    match (req.version, connection.as_deref()) {
        (_, Some("close")) => false,
        (Version::V1_0, Some("keep-alive")) => true,
        (Version::V1_0, _) => false,
        (Version::V1_1, _) => true,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Read, Write};
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    fn site() -> ServerConfig {
        let mut config = ServerConfig::new();
        config.on_get_request("/index.html")
            .set_response_body(b"<p id=\"counter\"></p>".to_vec())
            .build();
        config.on_get_request("/").internal_redirect("/index.html").build();
        config
    }

    #[test]
    fn build_fills_in_content_headers() {
        let config = site();
        let (headers, body) = config.resolve("/index.html").unwrap();
        assert_eq!(&body[..], b"<p id=\"counter\"></p>");
        assert!(headers.contains(&Header::content_type("text/html; charset=utf-8")));
        assert!(headers.contains(&Header::ContentLength(body.len())));
        assert!(headers.contains(&Header::cache_control("no-cache")));
    }

    #[test]
    fn explicit_headers_are_kept() {
        let mut config = ServerConfig::new();
        let mut builder = config.on_get_request("/data").set_response_body(b"7".to_vec());
        builder.add_response_header(Header::content_type("text/plain"));
        builder.build();
        let (headers, _) = config.resolve("/data").unwrap();
        assert_eq!(headers.iter().filter(|h| matches!(h, Header::ContentType(_))).count(), 1);
        assert!(headers.contains(&Header::content_type("text/plain")));
    }

    #[test]
    fn redirects_resolve_to_target_content() {
        let config = site();
        let (_, body) = config.resolve("/").unwrap();
        assert_eq!(&body[..], b"<p id=\"counter\"></p>");
        assert!(config.resolve("/missing").is_none());
    }

    #[test]
    fn redirect_cycles_give_up() {
        let mut config = ServerConfig::new();
        config.on_get_request("/a").internal_redirect("/b").build();
        config.on_get_request("/b").internal_redirect("/a").build();
        assert!(config.resolve("/a").is_none());
    }

    #[test]
    fn connection_header_controls_keep_alive() {
        let parse = |s: &str| s.parse::<Request>().unwrap();
        assert!(keep_alive(&parse("GET / HTTP/1.1")));
        assert!(!keep_alive(&parse("GET / HTTP/1.1\r\nConnection: close")));
        assert!(!keep_alive(&parse("GET / HTTP/1.0")));
        assert!(keep_alive(&parse("GET / HTTP/1.0\r\nConnection: Keep-Alive")));
    }

    struct Client {
        reader: BufReader<TcpStream>,
        writer: TcpStream,
    }

    impl Client {
        fn connect(addr: SocketAddr) -> Self {
            let stream = TcpStream::connect(addr).unwrap();
            Client { reader: BufReader::new(stream.try_clone().unwrap()), writer: stream }
        }

        fn send(&mut self, method: &str, path: &str) -> (String, Vec<String>, Vec<u8>) {
            write!(self.writer, "{method} {path} HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();
            let mut status = String::new();
            self.reader.read_line(&mut status).unwrap();
            let mut headers = vec![];
            loop {
                let mut line = String::new();
                self.reader.read_line(&mut line).unwrap();
                if line == "\r\n" { break }
                headers.push(line.trim_end().to_string());
            }
            let length: usize = headers.iter()
                .find_map(|h| h.strip_prefix("Content-Length: "))
                .map(|len| len.parse().unwrap())
                .unwrap_or(0);
            let mut body = vec![0; if method == "HEAD" { 0 } else { length }];
            self.reader.read_exact(&mut body).unwrap();
            (status.trim_end().to_string(), headers, body)
        }
    }

    #[test]
    fn serves_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = Server::new(listener, Arc::new(RwLock::new(site())));
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.listen());

        let mut client = Client::connect(addr);

        let (status, _, body) = client.send("GET", "/");
        assert_eq!(status, "HTTP/1.1 200 OK");
        assert_eq!(body, b"<p id=\"counter\"></p>");

        let (status, headers, body) = client.send("HEAD", "/index.html?cache=1");
        assert_eq!(status, "HTTP/1.1 200 OK");
        assert!(headers.contains(&"Content-Length: 20".to_string()));
        assert!(body.is_empty());

        let (status, _, _) = client.send("GET", "/nope.js");
        assert_eq!(status, "HTTP/1.1 404 Not Found");

        let (status, headers, _) = client.send("POST", "/");
        assert_eq!(status, "HTTP/1.1 405 Method Not Allowed");
        assert!(headers.contains(&"Allow: GET, HEAD".to_string()));
    }

    #[test]
    fn rebuilt_table_is_served_without_restart() {
        let config = Arc::new(RwLock::new(site()));
        let server = Server::new(TcpListener::bind("127.0.0.1:0").unwrap(), config.clone());
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.listen());

        let mut fresh = ServerConfig::new();
        fresh.on_get_request("/index.html").set_response_body(b"v2".to_vec()).build();
        *config.write().unwrap() = fresh;

        let (status, _, body) = Client::connect(addr).send("GET", "/index.html");
        assert_eq!(status, "HTTP/1.1 200 OK");
        assert_eq!(body, b"v2");
    }

    #[test]
    fn stalled_client_does_not_block_rebuilds() {
        let mut table = site();
        table.on_get_request("/huge_bg.wasm").set_response_body(vec![0; 64 << 20]).build();
        let config = Arc::new(RwLock::new(table));
        let server = Server::new(TcpListener::bind("127.0.0.1:0").unwrap(), config.clone());
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.listen());

        // Asks for far more than the socket buffers hold, then never reads.
        let mut stalled = TcpStream::connect(addr).unwrap();
        write!(stalled, "GET /huge_bg.wasm HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();
        thread::sleep(Duration::from_millis(300));

        let (done, finished) = mpsc::channel();
        thread::spawn(move || {
            let mut fresh = ServerConfig::new();
            fresh.on_get_request("/index.html").set_response_body(b"v2".to_vec()).build();
            *config.write().unwrap() = fresh;
            let (status, _, body) = Client::connect(addr).send("GET", "/index.html");
            done.send((status, body)).unwrap();
        });

        let (status, body) = finished.recv_timeout(Duration::from_secs(5))
            .expect("rebuild or second request blocked by stalled client");
        assert_eq!(status, "HTTP/1.1 200 OK");
        assert_eq!(body, b"v2");
        drop(stalled);
    }
}
