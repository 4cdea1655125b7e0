/// Endpoint of the counting service. CI builds may point the module at another
/// deployment by setting `VISITOR_COUNTER_URL` at compile time.
pub const FUNCTION_API_URL: &str = match option_env!("VISITOR_COUNTER_URL") {
    Some(url) => url,
    None      => "https://us-west1-dio-castillo-cloud.cloudfunctions.net/visitor_counter",
};

/// Id of the element whose text receives the counter value.
pub const COUNTER_ELEMENT_ID: &str = "counter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub element_id: String,
}

impl FetcherConfig {
    pub fn new(endpoint: impl Into<String>, element_id: impl Into<String>) -> Self {
        FetcherConfig { endpoint: endpoint.into(), element_id: element_id.into() }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig::new(FUNCTION_API_URL, COUNTER_ELEMENT_ID)
    }
}
