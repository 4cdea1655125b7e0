use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, info};
use notify::event::{Event, EventKind, ModifyKind};
use notify::{recommended_watcher, RecommendedWatcher, RecursiveMode, Result, Watcher};

use crate::bundle::build_site;
use crate::http::ServerConfig;
use crate::options::ServerOptions;

/// Sends a unit on `changes` whenever a source file or the page is written.
pub fn make_watcher(crate_dir: &Path, changes: Sender<()>) -> Result<RecommendedWatcher> {
    let mut watcher = recommended_watcher(move |e: Result<Event>| {
        let Ok(event) = &e else { return };
        if !is_content_change(&event.kind) { return };
        // The receiver only goes away when the server is shutting down.
        let _ = changes.send(());
    })?;
    watcher.watch(&crate_dir.join("src"), RecursiveMode::Recursive)?;
    watcher.watch(&crate_dir.join("index.html"), RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_)))
}

/// Rebuilds after every burst of changes and swaps the served endpoints.
/// A failed build keeps the previous site.
pub fn rebuild_on_change(options: &ServerOptions, config: &Arc<RwLock<ServerConfig>>, changes: Receiver<()>) {
    while changes.recv().is_ok() {
        while changes.try_recv().is_ok() {}
        info!("Change detected, rebuilding");
        match build_site(options) {
            Ok(site) => {
                *config.write().unwrap_or_else(PoisonError::into_inner) = site;
                info!("Rebuild done");
            }
            Err(err) => error!("Rebuild failed: {err}"),
        }
    }
}
