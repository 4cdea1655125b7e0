//! Browser side of the visitor counter. On wasm32 the module starts itself,
//! fetches the counter once and writes it into `#counter`.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
pub use self::{dom::*, fetch::*};

pub use visitor_counter_core::{CounterFetcher, FetcherConfig, Outcome};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. the module being instantiated twice) only fails to
    // replace the logger.
    let _ = console_log::init_with_level(log::Level::Debug);

    wasm_bindgen_futures::spawn_local(async {
        let document = match WebDocument::current() {
            Ok(document) => document,
            Err(err) => {
                log::error!("Failed to fetch visitor count: {err}");
                return;
            }
        };
        let fetcher = CounterFetcher::new(FetcherConfig::default(), WebSource, document);
        fetcher.fetch_and_display_count().await;
    });
}
