use visitor_counter_core::{CounterError, Document, Result, TextTarget};

pub struct WebDocument(web_sys::Document);

impl WebDocument {
    /// The document of the page this module runs in.
    pub fn current() -> Result<Self> {
        let window = web_sys::window()
            .ok_or(CounterError::environment("no global `window` exists"))?;
        let document = window.document()
            .ok_or(CounterError::environment("window has no document"))?;
        Ok(WebDocument(document))
    }
}

pub struct WebElement(web_sys::Element);

impl TextTarget for WebElement {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }
}
