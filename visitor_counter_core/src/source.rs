use std::fmt;

use log::warn;

use super::error::Result;

/// Text returned by the counting service. Never parsed, only displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterValue(String);

impl CounterValue {
    /// Counter text from a completed HTTP exchange. The body is kept whatever
    /// the status; a non-2xx status is only worth a warning.
    pub fn from_response(status: u16, body: String) -> Self {
        if !(200..300).contains(&status) {
            warn!("Counting service answered with status {status}");
        }
        CounterValue(body)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for CounterValue {
    fn from(value: String) -> Self {
        CounterValue(value)
    }
}

impl From<&str> for CounterValue {
    fn from(value: &str) -> Self {
        CounterValue(value.into())
    }
}

impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the counter value comes from. Implementations issue exactly one GET
/// per call and hand back the body verbatim.
#[allow(async_fn_in_trait)]
pub trait CounterSource {
    async fn fetch_text(&self, endpoint: &str) -> Result<CounterValue>;
}

impl<T: CounterSource> CounterSource for &T {
    async fn fetch_text(&self, endpoint: &str) -> Result<CounterValue> {
        (**self).fetch_text(endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::test_log;

    #[test]
    fn success_body_is_kept_quietly() {
        test_log::capture();
        assert_eq!(CounterValue::from_response(200, "42".into()).as_str(), "42");
        assert!(test_log::records().is_empty());
    }

    #[test]
    fn error_status_body_is_kept_with_warning() {
        test_log::capture();
        let value = CounterValue::from_response(500, "Internal Server Error".into());
        assert_eq!(value.as_str(), "Internal Server Error");
        assert!(test_log::contains(Level::Warn, "Counting service answered with status 500"));
    }
}
