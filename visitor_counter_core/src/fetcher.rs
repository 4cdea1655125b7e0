use log::{debug, error, info};

use super::config::FetcherConfig;
use super::document::{Document, TextTarget};
use super::error::CounterError;
use super::source::{CounterSource, CounterValue};

/// How a single invocation ended. Purely informational; the fetcher has
/// already logged it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Displayed(CounterValue),
    ElementMissing(CounterValue),
    Failed(CounterError),
}

pub struct CounterFetcher<S, D> {
    config: FetcherConfig,
    source: S,
    document: D,
}

impl<S: CounterSource, D: Document> CounterFetcher<S, D> {
    pub fn new(config: FetcherConfig, source: S, document: D) -> Self {
        CounterFetcher { config, source, document }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetches the counter once and writes it into the counter element.
    /// Failures end up in the log, never in the caller.
    pub async fn fetch_and_display_count(&self) -> Outcome {
        let count = match self.source.fetch_text(&self.config.endpoint).await {
            Ok(count) => count,
            Err(err) => {
                error!("Failed to fetch visitor count: {err}");
                return Outcome::Failed(err);
            }
        };
        info!("Visitor count fetched: {count}");

        let Some(element) = self.document.element_by_id(&self.config.element_id) else {
            debug!("No element with id '{}', discarding count", self.config.element_id);
            return Outcome::ElementMissing(count);
        };
        element.set_text(count.as_str());
        Outcome::Displayed(count)
    }
}
