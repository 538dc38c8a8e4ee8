//! Display state for the client shell.
//!
//! One mutable value (the displayed message) lives on the page, and each
//! completed request applies its outcome here in resolution order. Rapid
//! clicks race: the last response to resolve wins, which is not necessarily
//! the last click. Failures never touch the displayed value; they surface to
//! the caller as an explicit error instead of a UI state.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed: {}", self.reason)
    }
}

impl std::error::Error for FetchError {}

/// Extract the `message` field from a response body. A missing or non-string
/// field yields `None`, not a default string.
pub fn message_from_json(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[derive(Debug, Default)]
pub struct Shell {
    message: Option<String>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed message. `None` renders as an empty display.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Apply a completed request's outcome. A success overwrites the display
    /// (last write wins); a failure leaves it untouched and is handed back.
    pub fn apply(&mut self, outcome: Result<Option<String>, FetchError>) -> Result<(), FetchError> {
        match outcome {
            Ok(message) => {
                self.message = message;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_updates_display() {
        let mut shell = Shell::new();
        assert_eq!(shell.message(), None);

        shell
            .apply(Ok(Some("hello".to_string())))
            .expect("success outcome");
        assert_eq!(shell.message(), Some("hello"));
    }

    #[test]
    fn test_later_resolving_response_wins() {
        let mut shell = Shell::new();

        // Two clicks in flight; outcomes apply in resolution order.
        shell
            .apply(Ok(Some("first to resolve".to_string())))
            .expect("success outcome");
        shell
            .apply(Ok(Some("second to resolve".to_string())))
            .expect("success outcome");

        assert_eq!(shell.message(), Some("second to resolve"));
    }

    #[test]
    fn test_failure_leaves_display_unchanged() {
        let mut shell = Shell::new();
        shell
            .apply(Ok(Some("hello".to_string())))
            .expect("success outcome");

        let err = shell
            .apply(Err(FetchError::new("connection refused")))
            .expect_err("failure outcome");

        assert_eq!(shell.message(), Some("hello"));
        assert_eq!(err.to_string(), "fetch failed: connection refused");
    }

    #[test]
    fn test_missing_message_field_clears_display() {
        let mut shell = Shell::new();
        shell
            .apply(Ok(Some("hello".to_string())))
            .expect("success outcome");

        let body = json!({"status": "ok"});
        shell
            .apply(Ok(message_from_json(&body)))
            .expect("success outcome");

        assert_eq!(shell.message(), None);
    }

    #[test]
    fn test_message_from_json() {
        assert_eq!(
            message_from_json(&json!({"message": "hello"})),
            Some("hello".to_string())
        );
        assert_eq!(message_from_json(&json!({})), None);
        assert_eq!(message_from_json(&json!({"message": 42})), None);
    }
}
