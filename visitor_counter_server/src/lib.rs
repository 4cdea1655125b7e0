pub mod bundle;
pub mod fs;
pub mod http;
pub mod options;
pub mod utils;
pub mod watch;

use std::io;
use std::net::TcpListener;
use std::sync::mpsc::channel;
use std::sync::{Arc, RwLock};
use std::thread;

use log::info;
use thiserror::Error;

pub use bundle::{build_site, BuildError};
pub use http::{Server, ServerConfig};
pub use http::{EndpointWithoutContentBuilder, EndpointAnyBuilder};
pub use options::{OptionsError, ServerOptions};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("unable to watch for changes: {0}")]
    Watch(#[from] notify::Error),
    #[error("unable to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Builds the page once, then serves it until the process is stopped.
pub fn serve(options: ServerOptions) -> Result<(), ServeError> {
    let config = Arc::new(RwLock::new(build_site(&options)?));

    let addr = options.socket_addr();
    let listener = TcpListener::bind(&addr).map_err(|source| ServeError::Bind { addr: addr.clone(), source })?;
    let server = Server::new(listener, config.clone());

    // Kept alive for as long as we serve.
    let _watcher = if options.watch {
        let (tx, rx) = channel();
        let watcher = watch::make_watcher(&options.path, tx)?;
        let config = config.clone();
        let watch_options = options.clone();
        thread::spawn(move || watch::rebuild_on_change(&watch_options, &config, rx));
        info!("Watching {} for changes", options.path.display());
        Some(watcher)
    } else {
        None
    };

    let url = format!("http://{}", server.local_addr()?);
    println!("             ┏━{}━┓", "━".repeat(url.len()));
    println!("     \x1b[1m\x1b[92mServing\x1b[0m ┃ \x1b[1m{url}\x1b[0m ┃ <- Click to open your app! ");
    println!("             ┗━{}━┛", "━".repeat(url.len()));
    server.listen()?;
    Ok(())
}
