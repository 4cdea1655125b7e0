use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use visitor_counter_core::{CounterError, CounterSource, CounterValue, Result};

/// Issues the GET through the page's `window.fetch`.
pub struct WebSource;

impl CounterSource for WebSource {
    async fn fetch_text(&self, endpoint: &str) -> Result<CounterValue> {
        let window = web_sys::window()
            .ok_or(CounterError::environment("no global `window` exists"))?;
        let response = JsFuture::from(window.fetch_with_str(endpoint))
            .await
            .map_err(|err| CounterError::network(describe(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|err| CounterError::network(describe(&err)))?;
        let text = response.text().map_err(|err| CounterError::body(describe(&err)))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|err| CounterError::body(describe(&err)))?;
        // fetch resolves for 4xx/5xx as well; their body is shown like any other.
        text.as_string()
            .map(|body| CounterValue::from_response(response.status(), body))
            .ok_or(CounterError::body("response body is not a string"))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
