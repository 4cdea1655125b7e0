/// An element whose visible text can be replaced.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

/// The host document: only element lookup by id is needed.
pub trait Document {
    type Element: TextTarget;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

impl<T: Document> Document for &T {
    type Element = T::Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).element_by_id(id)
    }
}
